//! Error types for seglru

use std::fmt;

/// Result type alias for seglru operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache configuration
///
/// Lookup misses are not errors; they are `None`. The only failures this
/// crate reports are malformed configurations, rejected at construction
/// time.
#[derive(Debug)]
pub enum Error {
    /// Segment capacity must be greater than zero
    InvalidCapacity(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid segment capacity: {} (must be greater than 0)", capacity)
            }
        }
    }
}

impl std::error::Error for Error {}
