//! # prism-math
//!
//! Math primitives used by the prism color engine:
//!
//! - [`Mat3`] - 3x3 matrices for the linear color spaces (YIQ, YUV, LMS)
//! - Interpolation ([`lerp`]) and hue/angle helpers ([`wrap`], [`cos_deg`], [`acos_deg`])
//!
//! # Design
//!
//! This crate wraps [`glam`] double-precision types. Matrices are built from
//! **rows** and multiply **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use prism_math::Mat3;
//!
//! let rgb_to_yiq = Mat3::from_rows([
//!     [0.299, 0.587, 0.114],
//!     [0.596, -0.274, -0.322],
//!     [0.211, -0.523, 0.312],
//! ]);
//!
//! let yiq = rgb_to_yiq.transform([1.0, 1.0, 1.0]);
//! assert!((yiq[0] - 1.0).abs() < 1e-12);
//! ```
//!
//! # Used By
//!
//! - `prism-core` - conversion graph and gradients

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod mat3;

pub use interp::*;
pub use mat3::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{DMat3, DVec3};
}
