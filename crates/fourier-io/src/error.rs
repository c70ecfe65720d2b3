//! Error types for I/O operations.
//!
//! Provides unified error handling for all codec operations.

use fourier_core::ColorSpace;
use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The codec's native color space has no mapping onto the image model.
    #[error("unsupported color space: {0}")]
    UnsupportedColorSpace(String),

    /// Unsupported or undetectable file format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Error raised by the image model.
    #[error(transparent)]
    Core(#[from] fourier_core::Error),
}

impl IoError {
    /// Creates an [`IoError::UnsupportedColorSpace`] for a model color space
    /// a codec can't store.
    pub fn cannot_store(format: &str, color_space: ColorSpace) -> Self {
        Self::UnsupportedColorSpace(format!("{} cannot store {} images", format, color_space))
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
