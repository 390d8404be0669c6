use std::process::ExitStatus;

/// Errors from tree visualization.
///
/// Every failure of the underlying layout engine is wrapped here; the
/// engine's own error values never cross this crate's boundary unwrapped.
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    /// Returned when the layout engine executable cannot be launched.
    #[error("failed to launch rendering engine \"{engine}\"")]
    EngineSpawn {
        /// The engine executable that was attempted.
        engine: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when piping the graph to or from the engine fails.
    #[error("I/O failure while rendering with \"{engine}\"")]
    EngineIo {
        /// The engine executable in use.
        engine: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the engine exits unsuccessfully.
    #[error("rendering engine \"{engine}\" failed ({status}): {stderr}")]
    EngineFailed {
        /// The engine executable in use.
        engine: String,
        /// The engine's exit status.
        status: ExitStatus,
        /// Captured standard error output.
        stderr: String,
    },
}
