//! HTTP boundary for the tree-building service.
//!
//! Owns request/response DTOs, the server configuration, routing, and the
//! error-to-status mapping; all induction logic lives in `arbol-id3` and
//! all rendering in `arbol-dot`.

mod artifact;
mod handlers;
mod parse;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arbol_id3::{MetricsSummary, TreeConfig, TreeError};
use arbol_dot::VizError;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

/// Server configuration.
///
/// Construct via [`ServerConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter        | Default          |
/// |------------------|------------------|
/// | `max_depth`      | `None`           |
/// | `engine`         | `"dot"`          |
/// | `output_dir`     | `None`           |
/// | `cors_enabled`   | `true`           |
/// | `max_body_bytes` | 10 MiB           |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    max_depth: Option<usize>,
    engine: String,
    output_dir: Option<PathBuf>,
    cors_enabled: bool,
    max_body_bytes: usize,
}

impl ServerConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: None,
            engine: "dot".to_string(),
            output_dir: None,
            cors_enabled: true,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }

    /// Set the maximum decision depth applied to every build.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the Graphviz executable used for rendering.
    #[must_use]
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Set the directory metrics artifacts are written to.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Enable or disable permissive CORS headers.
    #[must_use]
    pub fn with_cors_enabled(mut self, cors_enabled: bool) -> Self {
        self.cors_enabled = cors_enabled;
        self
    }

    /// Return the configured maximum decision depth.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Return the configured rendering engine executable.
    #[must_use]
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Return the metrics artifact directory, if any.
    #[must_use]
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Validate the tunables shared with tree induction.
    ///
    /// # Errors
    ///
    /// Propagates the configuration variants of [`TreeError`].
    pub fn validate(&self) -> Result<(), TreeError> {
        self.tree_config().validate()
    }

    /// Build the per-request induction config.
    #[must_use]
    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig::new().with_max_depth(self.max_depth())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// Body of `POST /build_tree`.
///
/// `parameters` is a comma-separated column list whose last entry is the
/// target; `data` holds one comma-separated row per line.
#[derive(Debug, Deserialize)]
pub struct BuildTreeRequest {
    pub parameters: String,
    pub data: String,
}

/// Successful response of `POST /build_tree`.
#[derive(Debug, Serialize)]
pub struct BuildTreeResponse {
    pub success: bool,
    /// Build-log trace lines, in emission order.
    pub logs: Vec<String>,
    /// Base64-encoded rendered image.
    pub visualization: String,
    pub metrics: MetricsSummary,
}

/// JSON error envelope returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler-level failure, mapped to an HTTP status and JSON envelope.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or inconsistent input; reported as 400.
    BadRequest(String),
    /// Build or rendering failure inside the service; reported as 500.
    Internal(String),
}

impl ApiError {
    /// Return the HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(message) | ApiError::Internal(message) => message,
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<TreeError> for ApiError {
    fn from(err: TreeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<VizError> for ApiError {
    fn from(err: VizError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    let cors_enabled = state.config.cors_enabled;

    let router = Router::new()
        .route("/build_tree", post(handlers::build_tree))
        .route("/healthz", get(handlers::healthz))
        .layer(DefaultBodyLimit::max(body_limit));

    let router = if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn run(bind: SocketAddr, config: ServerConfig) -> Result<()> {
    let state = AppState {
        config: Arc::new(config),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(%bind, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
