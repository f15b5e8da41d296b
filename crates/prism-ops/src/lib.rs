//! # prism-ops
//!
//! Raster filters and compositing for the prism color engine.
//!
//! # Modules
//!
//! - [`filter`] - Filter contract, sequential application, pipelines
//! - [`point`] - Per-pixel filters (hue shift, noise, vignette, ...)
//! - [`convolve`] - Kernels and convolution (mean, disc, motion blur)
//! - [`median`] - Per-channel and rank median
//! - [`composite`] - Alpha compositing of two rasters
//! - `parallel` - Row-parallel application (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use prism_core::{BlendMode, Color, Raster};
//! use prism_ops::{composite, convolve::Convolution, filter::apply, point::Noise};
//!
//! let src = Raster::from_fn(8, 8, |x, y| Color::rgb(x as f64 / 8.0, y as f64 / 8.0, 0.5))?;
//! let blurred = apply(&src, &Convolution::disc_blur(3, 3)?)?;
//! let noisy = apply(&src, &Noise::new(0.02, 42))?;
//! let out = composite::blend_rasters(&blurred, &noisy, BlendMode::Screen.into())?;
//! assert_eq!(out.dimensions(), (8, 8));
//! # Ok::<(), prism_ops::OpsError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod composite;
pub mod convolve;
pub mod filter;
pub mod median;
pub mod point;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use composite::blend_rasters;
pub use convolve::{Convolution, Kernel};
pub use error::{OpsError, OpsResult};
pub use filter::{Filter, Pipeline, PointFilter, apply};
pub use median::{Median, RankMedian};
