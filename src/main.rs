use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod server;

use server::ServerConfig;

#[derive(Parser)]
#[command(name = "arbol")]
#[command(about = "Categorical decision tree induction and visualization service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server exposing tree building and rendering
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:5001")]
        bind: SocketAddr,

        /// Maximum decision depth for built trees (unlimited if not set)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Graphviz executable used for rendering
        #[arg(long, default_value = "dot")]
        engine: String,

        /// Directory for per-build metrics artifacts (disabled if not set)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Disable permissive CORS headers
        #[arg(long)]
        no_cors: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve {
            bind,
            max_depth,
            engine,
            output_dir,
            no_cors,
        } => {
            let config = ServerConfig::new()
                .with_max_depth(max_depth)
                .with_engine(engine)
                .with_output_dir(output_dir)
                .with_cors_enabled(!no_cors);
            config.validate().context("invalid server configuration")?;

            server::run(bind, config).await
        }
    }
}
