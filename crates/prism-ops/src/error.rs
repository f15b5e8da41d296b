//! Error types for raster operations.

use thiserror::Error;

/// Error type for raster operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Failure reported by a core type (raster, color, conversion).
    #[error(transparent)]
    Core(#[from] prism_core::Error),

    /// Invalid filter or kernel parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl OpsError {
    /// The wrapped core error, if any.
    pub fn as_core(&self) -> Option<&prism_core::Error> {
        match self {
            Self::Core(e) => Some(e),
            Self::InvalidParameter(_) => None,
        }
    }
}

/// Result type for raster operations.
pub type OpsResult<T> = Result<T, OpsError>;
