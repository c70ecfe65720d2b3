//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Kernel has an even dimension, ragged rows or no cells.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error raised by the underlying image model.
    #[error(transparent)]
    Core(#[from] fourier_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
