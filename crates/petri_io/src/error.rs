//! Error types for petri_io crate.
//!
//! Covers reading and validating board files.

use thiserror::Error;

/// Main error type for petri_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// A token that is not a non-negative integer
    #[error("Parse error at token {index} ({token:?}): {message}")]
    Parse {
        index: usize,
        token: String,
        message: String,
    },

    /// Well-formed numbers that describe an impossible board
    #[error("Validation error: {0}")]
    Validation(String),

    /// Board too large to address
    #[error("Resource error: {0}")]
    Resource(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for petri_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a new resource error.
    #[must_use]
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        Self::Resource(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
