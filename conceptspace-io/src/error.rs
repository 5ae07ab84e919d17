//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for conceptspace_core::Error {
    fn from(e: IoError) -> Self {
        use conceptspace_core::Error;
        match e {
            IoError::FileNotFound { path } => Error::NotFound(path),
            IoError::Io(io) => Error::Io(io),
            other => Error::InvalidData(other.to_string()),
        }
    }
}
