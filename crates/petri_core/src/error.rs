//! Error types for the simulation engine.
//!
//! Every variant is fatal to the run. Nothing in the engine retries or
//! degrades; errors travel up to the caller, which reports them and exits.

use thiserror::Error;

/// Main error type for petri_core operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed or out-of-range run parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// Board data that cannot be simulated (out-of-range coordinates)
    #[error("Input error: {0}")]
    Input(String),

    /// Buffer allocation or size overflow
    #[error("Resource error: {0}")]
    Resource(String),

    /// A lock or barrier round left shared state in an unknown condition
    #[error("Synchronization error: {0}")]
    Sync(String),

    /// The operating system refused to create a worker thread
    #[error("Failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker panicked while computing or rendering
    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// A worker stopped because a peer already failed the run
    #[error("Worker {worker} stopped after a peer failure")]
    Aborted { worker: usize },

    /// Renderer output failed
    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

/// Result type alias for petri_core operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new input error.
    #[must_use]
    pub fn input<S: Into<String>>(msg: S) -> Self {
        Self::Input(msg.into())
    }

    /// Creates a new resource error.
    #[must_use]
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        Self::Resource(msg.into())
    }

    /// Creates a new synchronization error.
    #[must_use]
    pub fn sync<S: Into<String>>(msg: S) -> Self {
        Self::Sync(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::config("4 workers for 3 rows");
        assert_eq!(err.to_string(), "Configuration error: 4 workers for 3 rows");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: EngineError = io_err.into();
        assert!(matches!(err, EngineError::Render(_)));
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        let err = EngineError::Spawn {
            worker: 2,
            source: std::io::Error::new(std::io::ErrorKind::OutOfMemory, "no threads"),
        };
        assert!(err.to_string().contains("worker 2"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
