//! STL errors.

use solid_mesh::ValidationError;
use thiserror::Error;

/// Errors raised while reading or writing STL.
#[derive(Debug, Error)]
pub enum StlError {
    /// The underlying reader or writer failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a readable STL file.
    #[error("parse error: {0}")]
    Parse(String),

    /// The mesh cannot be written, or the file does not describe a closed
    /// solid.
    #[error("invalid mesh: {message}")]
    InvalidMesh {
        /// What was wrong.
        message: String,
    },
}

impl StlError {
    /// Creates an invalid mesh error.
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }
}

impl From<ValidationError> for StlError {
    fn from(err: ValidationError) -> Self {
        Self::invalid_mesh(err.to_string())
    }
}
