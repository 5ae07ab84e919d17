//! Error types for conceptspace

use thiserror::Error;

/// Main error type for conceptspace operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for conceptspace operations
pub type Result<T> = std::result::Result<T, Error>;
