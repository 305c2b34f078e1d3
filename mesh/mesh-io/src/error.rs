//! Error types for mesh I/O operations.

use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// The mesh or the requested output cannot be expressed in the format.
    #[error("invalid content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Too many triangles for the binary STL face counter.
    #[error("binary STL holds at most {max} triangles, got {got}")]
    TooManyTriangles {
        /// Largest count the format can store.
        max: u64,
        /// Triangles in the mesh.
        got: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// String conversion error.
    #[error("string conversion error: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoError::invalid_content("solid name contains a newline");
        assert_eq!(
            format!("{err}"),
            "invalid content: solid name contains a newline"
        );

        let err = IoError::TooManyTriangles {
            max: u64::from(u32::MAX),
            got: 7,
        };
        assert!(format!("{err}").contains("4294967295"));
    }
}
