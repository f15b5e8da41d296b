//! Error types for prism-core operations.
//!
//! All failures in the core are local, synchronous validation failures:
//! there is no I/O, so nothing here is retryable. Callers are expected to
//! treat them as programming errors.
//!
//! # Usage
//!
//! ```rust
//! use prism_core::{Color, ColorSpace, Error};
//!
//! let err = Color::new(ColorSpace::Cmyk, &[0.1, 0.2, 0.3]).unwrap_err();
//! assert!(matches!(err, Error::DimensionMismatch { expected: 4, got: 3, .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or transforming colors and rasters.
///
/// # Categories
///
/// - **Color errors**: [`DimensionMismatch`](Error::DimensionMismatch),
///   [`UnknownChannel`](Error::UnknownChannel), [`UnsupportedSpace`](Error::UnsupportedSpace),
///   [`WrongSpace`](Error::WrongSpace)
/// - **Raster errors**: [`EmptyRaster`](Error::EmptyRaster),
///   [`InconsistentRaster`](Error::InconsistentRaster), [`SizeMismatch`](Error::SizeMismatch)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Vector length does not match the arity of the color space.
    #[error("dimension mismatch for {space}: expected {expected} channels, got {got}")]
    DimensionMismatch {
        /// Color space name
        space: &'static str,
        /// Arity of the space
        expected: usize,
        /// Length that was supplied
        got: usize,
    },

    /// Channel label is not defined for the color space.
    #[error("no such color channel '{label}' in color space {space}")]
    UnknownChannel {
        /// Color space name
        space: &'static str,
        /// Requested label
        label: char,
    },

    /// Color space identifier is not recognized.
    #[error("unsupported color space: {name}")]
    UnsupportedSpace {
        /// Identifier that failed to resolve
        name: String,
    },

    /// Operation is only defined for one particular space.
    #[error("operation requires a {expected} color, got {got}")]
    WrongSpace {
        /// Space the operation needs
        expected: &'static str,
        /// Space that was supplied
        got: &'static str,
    },

    /// Neighborhood contains pixels of mixed spaces or arities.
    #[error("inconsistent raster at ({x}, {y}): {reason}")]
    InconsistentRaster {
        /// Pixel x coordinate
        x: usize,
        /// Pixel y coordinate
        y: usize,
        /// What did not match
        reason: String,
    },

    /// Raster has zero width or height.
    #[error("empty raster: {width}x{height}")]
    EmptyRaster {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// Two rasters (or a raster and its pixel buffer) disagree in size.
    #[error("size mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    SizeMismatch {
        /// First width
        a_width: usize,
        /// First height
        a_height: usize,
        /// Second width
        b_width: usize,
        /// Second height
        b_height: usize,
    },

    /// Parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Creates an [`Error::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::SizeMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InconsistentRaster`] error.
    #[inline]
    pub fn inconsistent(x: usize, y: usize, reason: impl Into<String>) -> Self {
        Self::InconsistentRaster {
            x,
            y,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error concerns raster geometry or contents.
    #[inline]
    pub fn is_raster_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyRaster { .. } | Self::InconsistentRaster { .. } | Self::SizeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_channel_message() {
        let err = Error::UnknownChannel {
            space: "RGB",
            label: 'x',
        };
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("RGB"));
        assert!(!err.is_raster_error());
    }

    #[test]
    fn test_size_mismatch() {
        let err = Error::size_mismatch((4, 4), (8, 2));
        let msg = err.to_string();
        assert!(msg.contains("4x4"));
        assert!(msg.contains("8x2"));
        assert!(err.is_raster_error());
    }
}
