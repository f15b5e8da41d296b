//! Linear gradients between two colors.
//!
//! Both endpoints are converted into the gradient's space once, at
//! construction. Interpolation is then a straight line in that space's
//! coordinates: `from + (to - from) * t`. Hue is not interpolated along the
//! shorter arc; it is re-wrapped after the fact like any other hue value.

use crate::colorspace::ColorSpace;
use crate::convert::Channels;
use crate::{Color, Error, Result};

/// A precomputed two-stop gradient.
///
/// # Example
///
/// ```rust
/// use prism_core::{Color, ColorSpace, Gradient};
///
/// let g = Gradient::new(Color::rgb(0.0, 0.0, 0.0), Color::rgb(1.0, 1.0, 1.0), ColorSpace::Rgb);
/// assert_eq!(g.interpolate(0.5), Color::rgb(0.5, 0.5, 0.5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    from: Color,
    delta: Channels,
}

impl Gradient {
    /// Creates a gradient from `from` to `to` in `space`.
    pub fn new(from: Color, to: Color, space: ColorSpace) -> Self {
        let from = from.convert(space);
        let to = to.convert(space);
        let mut delta = [0.0; ColorSpace::MAX_CHANNELS];
        for (d, (a, b)) in delta.iter_mut().zip(from.channels().iter().zip(to.channels())) {
            *d = b - a;
        }
        Self { from, delta }
    }

    /// Space the gradient interpolates in.
    pub fn space(&self) -> ColorSpace {
        self.from.space()
    }

    /// Start color, in the gradient's space.
    pub fn start(&self) -> Color {
        self.from
    }

    /// Per-channel difference `to - from`.
    pub fn delta(&self) -> &[f64] {
        &self.delta[..self.from.arity()]
    }

    /// Color at parameter `t`. `t` is not clamped, so values outside [0, 1]
    /// extrapolate.
    pub fn interpolate(&self, t: f64) -> Color {
        let mut out = [0.0; ColorSpace::MAX_CHANNELS];
        for (o, (a, d)) in out.iter_mut().zip(self.from.channels().iter().zip(&self.delta)) {
            *o = prism_math::lerp(*a, *a + *d, t);
        }
        Color::from_parts(self.space(), out)
    }

    /// `n` evenly spaced stops, both endpoints included.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `n < 2`.
    pub fn samples(&self, n: usize) -> Result<Vec<Color>> {
        if n < 2 {
            return Err(Error::InvalidParameter(format!(
                "gradient needs at least 2 samples, got {n}"
            )));
        }
        let last = (n - 1) as f64;
        Ok((0..n).map(|i| self.interpolate(i as f64 / last)).collect())
    }
}

/// One-shot interpolation without keeping the [`Gradient`].
pub fn interpolate(from: Color, to: Color, space: ColorSpace, t: f64) -> Color {
    Gradient::new(from, to, space).interpolate(t)
}
