//! Error types for image-to-mesh generation.

use thiserror::Error;

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Coarse failure category reported across the pipeline boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The bytes are not a usable PNG/JPEG raster.
    Decode,
    /// The image has no feature the strategy could extrude.
    DegenerateInput,
    /// A geometry or numeric invariant broke during construction.
    Internal,
    /// The generation parameters are unusable.
    InvalidConfig,
}

/// Errors that can occur while turning an image into a mesh.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Image bytes could not be decoded, or decoded to nothing.
    #[error("decode error: {message}")]
    Decode {
        /// What went wrong.
        message: String,
    },

    /// The field is flat where the strategy requires variation.
    #[error("degenerate input: {message}")]
    DegenerateInput {
        /// What was missing.
        message: String,
    },

    /// Unexpected state inside the generator.
    #[error("internal error: {message}")]
    Internal {
        /// Which invariant broke.
        message: String,
    },

    /// A generation parameter is out of range.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Which parameter, and why.
        message: String,
    },
}

impl GenerateError {
    /// Create a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a degenerate-input error.
    #[must_use]
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput {
            message: message.into(),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an invalid-config error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// The failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } => ErrorKind::Decode,
            Self::DegenerateInput { .. } => ErrorKind::DegenerateInput,
            Self::Internal { .. } => ErrorKind::Internal,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    /// The human-readable message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Decode { message }
            | Self::DegenerateInput { message }
            | Self::Internal { message }
            | Self::InvalidConfig { message } => message,
        }
    }
}

impl From<image::ImageError> for GenerateError {
    fn from(err: image::ImageError) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<mesh_io::IoError> for GenerateError {
    fn from(err: mesh_io::IoError) -> Self {
        Self::internal(format!("serialization failed: {err}"))
    }
}
