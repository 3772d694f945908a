//! # Petri IO
//!
//! Board file loading for the Petri simulator.

/// Error types and result aliases for I/O operations
pub mod error;
/// Board file parsing and validation
pub mod loader;

pub use error::{IoError, Result};
pub use loader::{load_board, parse_board};
