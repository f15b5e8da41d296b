//! Per-pixel filters.
//!
//! - [`HueShift`] - rotate the HSV hue
//! - [`Noise`] - deterministic uniform noise per channel
//! - [`Vignette`] - radial falloff written into one HSL channel
//! - [`InvertLightness`] - mirror HSL lightness
//! - [`Grayscale`] - project onto the grey space
//! - [`SpaceConvert`] - convert every pixel into one space
//!
//! All of these except [`Vignette`] are [`PointFilter`]s. The vignette needs
//! the raster size, so it implements [`Filter`] directly.

use crate::filter::{Filter, PointFilter};
use crate::{OpsError, OpsResult};
use prism_core::{Color, ColorSpace, Raster};

// ============================================================================
// Hue shift
// ============================================================================

/// Adds a fixed number of degrees to the HSV hue. Output is HSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueShift {
    /// Hue offset in degrees; any value, wrapped on output.
    pub degrees: f64,
}

impl HueShift {
    /// Creates a hue shift.
    pub fn new(degrees: f64) -> Self {
        Self { degrees }
    }
}

impl PointFilter for HueShift {
    fn filter_pixel(&self, _x: usize, _y: usize, color: &Color) -> Color {
        let hsv = color.convert(ColorSpace::Hsv);
        let c = hsv.channels();
        Color::hsv(c[0] + self.degrees, c[1], c[2])
    }
}

// ============================================================================
// Noise
// ============================================================================

/// Adds uniform noise in `[-max_noise, +max_noise]` to every channel.
///
/// The noise value is a hash of `(seed, x, y, channel)`, so the same seed
/// always produces the same raster, in any evaluation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Noise {
    /// Largest absolute offset per channel.
    pub max_noise: f64,
    /// Seed for the coordinate hash.
    pub seed: u32,
}

impl Noise {
    /// Creates a noise filter.
    pub fn new(max_noise: f64, seed: u32) -> Self {
        Self { max_noise, seed }
    }

    /// The offset added to channel `c` of pixel `(x, y)`.
    pub fn sample(&self, x: usize, y: usize, c: usize) -> f64 {
        let u = hash_to_unit(hash_coords(self.seed, x as u32, y as u32, c as u32));
        self.max_noise * (u * 2.0 - 1.0)
    }
}

impl PointFilter for Noise {
    fn filter_pixel(&self, x: usize, y: usize, color: &Color) -> Color {
        color.map_indexed(|c, v| v + self.sample(x, y, c))
    }
}

/// FNV-1a style coordinate hash with a murmur finalizer.
fn hash_coords(seed: u32, x: u32, y: u32, c: u32) -> u32 {
    let mut h = seed.wrapping_add(0x811c9dc5);
    h = h.wrapping_mul(0x01000193) ^ x;
    h = h.wrapping_mul(0x01000193) ^ y;
    h = h.wrapping_mul(0x01000193) ^ c;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^ (h >> 16)
}

/// Maps a hash onto [0, 1].
#[inline]
fn hash_to_unit(hash: u32) -> f64 {
    f64::from(hash) / f64::from(u32::MAX)
}

// ============================================================================
// Vignette
// ============================================================================

/// Radial falloff written into one HSL channel. Output is HSL.
///
/// For pixel `(x, y)` of a `w x h` raster, with `cx = w / 2` and
/// `cy = h / 2` (integer halves):
///
/// ```text
/// v     = hypot(x - cx, (w / h) * (y - cy)) / hypot(cx, cy)
/// value = 1 - (2v - 1)^exponent
/// ```
///
/// `v` is 0 when `hypot(cx, cy)` is 0 (a 1x1 raster). Odd or fractional
/// exponents give negative or NaN values past the midpoint; even integers
/// are the usual choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vignette {
    channel: char,
    exponent: f64,
}

impl Vignette {
    /// Creates a vignette that overwrites HSL channel `channel`.
    ///
    /// # Errors
    ///
    /// [`OpsError::Core`] with `UnknownChannel` if `channel` is not one of
    /// `h`, `s`, `l`.
    pub fn new(channel: char, exponent: f64) -> OpsResult<Self> {
        ColorSpace::Hsl.require_channel(channel)?;
        if !exponent.is_finite() {
            return Err(OpsError::InvalidParameter(format!(
                "vignette exponent must be finite, got {exponent}"
            )));
        }
        Ok(Self { channel, exponent })
    }

    /// Channel label being overwritten.
    pub fn channel(&self) -> char {
        self.channel
    }

    /// Falloff exponent.
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Normalized elliptical distance of `(x, y)` from the raster center.
    pub fn distance(x: usize, y: usize, width: usize, height: usize) -> f64 {
        let cx = (width / 2) as f64;
        let cy = (height / 2) as f64;
        let norm = cx.hypot(cy);
        if norm == 0.0 {
            return 0.0;
        }
        let aspect = width as f64 / height as f64;
        (x as f64 - cx).hypot(aspect * (y as f64 - cy)) / norm
    }

    /// Falloff value at normalized distance `v`.
    pub fn falloff(&self, v: f64) -> f64 {
        1.0 - (2.0 * v - 1.0).powf(self.exponent)
    }
}

impl Filter for Vignette {
    fn filter(&self, x: usize, y: usize, raster: &Raster) -> OpsResult<Color> {
        let (w, h) = raster.dimensions();
        let value = self.falloff(Self::distance(x, y, w, h));
        Ok(raster
            .pixel(x, y)
            .convert(ColorSpace::Hsl)
            .with_channel(self.channel, value)?)
    }
}

// ============================================================================
// Simple space operations
// ============================================================================

/// Mirrors HSL lightness. Output is HSL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvertLightness;

impl PointFilter for InvertLightness {
    fn filter_pixel(&self, _x: usize, _y: usize, color: &Color) -> Color {
        color.invert_lightness()
    }
}

/// Projects every pixel onto the grey space (HSV value).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grayscale;

impl PointFilter for Grayscale {
    fn filter_pixel(&self, _x: usize, _y: usize, color: &Color) -> Color {
        color.convert(ColorSpace::Grey)
    }
}

/// Converts every pixel into a fixed space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceConvert(pub ColorSpace);

impl PointFilter for SpaceConvert {
    fn filter_pixel(&self, _x: usize, _y: usize, color: &Color) -> Color {
        color.convert(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::apply;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hue_shift() {
        let f = HueShift::new(240.0);
        let out = f.filter_pixel(0, 0, &Color::hsv(200.0, 0.5, 0.5));
        assert_eq!(out.space(), ColorSpace::Hsv);
        assert_abs_diff_eq!(out.channels()[0], 80.0, epsilon = 1e-9);

        let neg = HueShift::new(-30.0).filter_pixel(0, 0, &Color::rgb(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(neg.channels()[0], 330.0, epsilon = 1e-9);
    }

    #[test]
    fn test_noise_bounded_and_deterministic() {
        let src = Raster::filled(16, 16, Color::rgb(0.5, 0.5, 0.5)).unwrap();
        let f = Noise::new(0.1, 7);
        let a = apply(&src, &f).unwrap();
        let b = apply(&src, &f).unwrap();
        for (p, q) in a.pixels().iter().zip(b.pixels()) {
            assert_eq!(p.channels(), q.channels());
            for v in p.channels() {
                assert!((0.4..=0.6).contains(v), "{v}");
            }
        }

        let other = apply(&src, &Noise::new(0.1, 8)).unwrap();
        assert_ne!(a.pixels()[0].channels(), other.pixels()[0].channels());
    }

    #[test]
    fn test_noise_spread() {
        let f = Noise::new(1.0, 1);
        let samples: Vec<f64> = (0..1000).map(|i| f.sample(i % 40, i / 40, 0)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.1, "{mean}");
        assert!(samples.iter().any(|v| *v > 0.8));
        assert!(samples.iter().any(|v| *v < -0.8));
    }

    #[test]
    fn test_vignette_validation() {
        assert!(Vignette::new('l', 2.0).is_ok());
        assert!(Vignette::new('S', 2.0).is_ok());
        assert!(matches!(
            Vignette::new('v', 2.0),
            Err(OpsError::Core(prism_core::Error::UnknownChannel { .. }))
        ));
        assert!(Vignette::new('l', f64::NAN).is_err());
    }

    #[test]
    fn test_vignette_falloff() {
        // center is v = 0, value 1 - (-1)^2 = 0
        assert_eq!(Vignette::distance(5, 5, 10, 10), 0.0);
        assert_abs_diff_eq!(Vignette::distance(0, 0, 10, 10), 1.0, epsilon = 1e-12);
        assert_eq!(Vignette::distance(0, 0, 1, 1), 0.0);

        let v = Vignette::new('l', 2.0).unwrap();
        assert_eq!(v.falloff(0.5), 1.0);
        assert_eq!(v.falloff(0.0), 0.0);

        let src = Raster::filled(10, 10, Color::rgb(1.0, 0.0, 0.0)).unwrap();
        let out = apply(&src, &v).unwrap();
        let mid = out.pixel(5, 5);
        assert_eq!(mid.space(), ColorSpace::Hsl);
        assert_eq!(mid.channel('l').unwrap(), 0.0);
        assert_eq!(mid.channel('s').unwrap(), 1.0);
    }

    #[test]
    fn test_vignette_single_pixel() {
        let src = Raster::filled(1, 1, Color::rgb(0.2, 0.4, 0.6)).unwrap();
        let out = apply(&src, &Vignette::new('l', 2.0).unwrap()).unwrap();
        assert_eq!(out.pixel(0, 0).channel('l').unwrap(), 0.0);
    }

    #[test]
    fn test_space_filters() {
        let c = Color::rgb(0.2, 0.6, 0.4);
        assert_eq!(Grayscale.filter_pixel(0, 0, &c), Color::grey(0.6));
        assert_eq!(SpaceConvert(ColorSpace::Yuv).filter_pixel(0, 0, &c).space(), ColorSpace::Yuv);
        let inv = InvertLightness.filter_pixel(0, 0, &c);
        assert_abs_diff_eq!(inv.channel('l').unwrap(), 0.6, epsilon = 1e-12);
    }
}
