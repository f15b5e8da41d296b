//! # prism-core
//!
//! Core types for the prism color and raster engine.
//!
//! - [`ColorSpace`] - Closed set of supported color spaces
//! - [`Color`], [`ColorBuilder`] - Immutable color values and their builder
//! - [`convert`] - RGB-hub conversion graph
//! - [`BlendMode`], [`BlendConfig`] - Per-channel blend algebra
//! - [`Gradient`] - Two-stop linear interpolation
//! - [`Raster`] - Row-major grid of colors with global alpha
//! - [`palette`] - Fixed palettes
//!
//! ## Design
//!
//! Every space converts to and from RGB; nothing else talks directly.
//! Colors compare equal when they look the same at 8 bits:
//!
//! ```
//! use prism_core::{Color, ColorSpace};
//!
//! let c = Color::from_rgb8(204, 127, 51);
//! assert_eq!(c.convert(ColorSpace::Hsi).convert(ColorSpace::Rgb), c);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! prism-math (matrices, interpolation)
//!    ^
//!    |
//! prism-core (this crate)
//!    ^
//!    |
//!    +-- prism-ops (filters, compositing)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialization for [`ColorSpace`], [`BlendMode`] and [`BlendConfig`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod blend;
pub mod color;
pub mod colorspace;
pub mod convert;
pub mod error;
pub mod gradient;
pub mod palette;
pub mod raster;

// Re-exports for convenience
pub use blend::{BlendConfig, BlendMode, DivisionPolicy, default_blend_mode, set_default_blend_mode};
pub use color::{Color, ColorBuilder};
pub use colorspace::ColorSpace;
pub use error::*;
pub use gradient::Gradient;
pub use raster::Raster;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use prism_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::blend::{BlendConfig, BlendMode, DivisionPolicy};
    pub use crate::color::{Color, ColorBuilder};
    pub use crate::colorspace::ColorSpace;
    pub use crate::error::{Error, Result};
    pub use crate::gradient::Gradient;
    pub use crate::raster::Raster;
}
