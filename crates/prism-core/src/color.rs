//! The color value type.
//!
//! A [`Color`] is a point in one [`ColorSpace`]: the space tag plus a channel
//! vector of exactly that space's arity. Values are immutable and `Copy`;
//! every operation returns a new color. Mutable assembly goes through
//! [`ColorBuilder`].
//!
//! # Equality
//!
//! Two colors are equal when their RGB projections agree at 8-bit precision
//! (each channel clamped to [0, 1], scaled by 255 and rounded). This is
//! coarser than comparing channel vectors:
//!
//! ```rust
//! use prism_core::{Color, ColorSpace};
//!
//! let red = Color::rgb(1.0, 0.0, 0.0);
//! let also_red = Color::hsv(360.0, 1.0, 1.0);
//! assert_eq!(red, also_red);
//! assert_eq!(red, red.convert(ColorSpace::Cmyk));
//! ```
//!
//! Use [`Color::channels`] when raw vectors matter.

use crate::colorspace::{ColorSpace, HUE_PERIOD};
use crate::convert::{self, Channels};
use crate::{Error, Result};
use prism_math::wrap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Protanope relation: `l' = PROTANOPE_M * m + PROTANOPE_S * s`.
pub const PROTANOPE_M: f64 = 2.02344;
/// See [`PROTANOPE_M`].
pub const PROTANOPE_S: f64 = -2.52581;

/// A color value in a specific color space.
#[derive(Copy, Clone, Debug)]
pub struct Color {
    space: ColorSpace,
    channels: Channels,
}

impl Color {
    /// Creates a color, checking the vector length against the space arity.
    ///
    /// Hue channels are wrapped into [0, 360).
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `channels.len() != space.arity()`.
    pub fn new(space: ColorSpace, channels: &[f64]) -> Result<Self> {
        if channels.len() != space.arity() {
            return Err(Error::DimensionMismatch {
                space: space.name(),
                expected: space.arity(),
                got: channels.len(),
            });
        }
        let mut buf = [0.0; ColorSpace::MAX_CHANNELS];
        buf[..channels.len()].copy_from_slice(channels);
        Ok(Self::from_parts(space, buf))
    }

    /// Creates a color from a space identifier such as `"hsv"` or `"CMYK"`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedSpace`] for an unknown identifier, or
    /// [`Error::DimensionMismatch`] as in [`Color::new`].
    pub fn from_space_id(id: &str, channels: &[f64]) -> Result<Self> {
        Self::new(id.parse()?, channels)
    }

    /// Builds from a full channel buffer, wrapping the hue and zeroing padding.
    pub(crate) fn from_parts(space: ColorSpace, mut channels: Channels) -> Self {
        for c in channels.iter_mut().skip(space.arity()) {
            *c = 0.0;
        }
        if space.is_hue() {
            channels[0] = wrap(channels[0], HUE_PERIOD);
        }
        Self { space, channels }
    }

    #[inline]
    fn tri(space: ColorSpace, a: f64, b: f64, c: f64) -> Self {
        Self::from_parts(space, [a, b, c, 0.0])
    }

    /// RGB color, channels nominally in [0, 1].
    #[inline]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::tri(ColorSpace::Rgb, r, g, b)
    }

    /// HSV color, hue in degrees.
    #[inline]
    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        Self::tri(ColorSpace::Hsv, h, s, v)
    }

    /// HSL color, hue in degrees.
    #[inline]
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::tri(ColorSpace::Hsl, h, s, l)
    }

    /// HSI color, hue in degrees.
    #[inline]
    pub fn hsi(h: f64, s: f64, i: f64) -> Self {
        Self::tri(ColorSpace::Hsi, h, s, i)
    }

    /// HCY color, hue in degrees.
    #[inline]
    pub fn hcy(h: f64, c: f64, y: f64) -> Self {
        Self::tri(ColorSpace::Hcy, h, c, y)
    }

    /// CMYK color.
    #[inline]
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self::from_parts(ColorSpace::Cmyk, [c, m, y, k])
    }

    /// YIQ color.
    #[inline]
    pub fn yiq(y: f64, i: f64, q: f64) -> Self {
        Self::tri(ColorSpace::Yiq, y, i, q)
    }

    /// YUV color on the 0-255 scale.
    #[inline]
    pub fn yuv(y: f64, u: f64, v: f64) -> Self {
        Self::tri(ColorSpace::Yuv, y, u, v)
    }

    /// LMS color.
    #[inline]
    pub fn lms(l: f64, m: f64, s: f64) -> Self {
        Self::tri(ColorSpace::Lms, l, m, s)
    }

    /// Grey value.
    #[inline]
    pub fn grey(v: f64) -> Self {
        Self::from_parts(ColorSpace::Grey, [v, 0.0, 0.0, 0.0])
    }

    /// RGB color from 8-bit channels.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// RGB color from a packed `0xRRGGBB` value. The top byte is ignored.
    #[inline]
    pub fn from_rgb24(rgb: u32) -> Self {
        Self::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The color space.
    #[inline]
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    /// Number of channels.
    #[inline]
    pub fn arity(&self) -> usize {
        self.space.arity()
    }

    /// Channel values, exactly `arity()` long.
    #[inline]
    pub fn channels(&self) -> &[f64] {
        &self.channels[..self.space.arity()]
    }

    /// Channel value by label (case-insensitive).
    pub fn channel(&self, label: char) -> Result<f64> {
        Ok(self.channels[self.space.require_channel(label)?])
    }

    /// Returns a copy with the labelled channel replaced.
    pub fn with_channel(&self, label: char, value: f64) -> Result<Self> {
        let idx = self.space.require_channel(label)?;
        let mut channels = self.channels;
        channels[idx] = value;
        Ok(Self::from_parts(self.space, channels))
    }

    // ------------------------------------------------------------------------
    // Conversion
    // ------------------------------------------------------------------------

    /// Converts into `target`, routing through RGB.
    pub fn convert(&self, target: ColorSpace) -> Self {
        Self::from_parts(
            target,
            convert::convert(self.space, target, &self.channels),
        )
    }

    /// RGB projection, unclamped.
    #[inline]
    pub fn to_rgb(&self) -> [f64; 3] {
        convert::to_rgb(self.space, &self.channels)
    }

    /// 8-bit RGB projection: clamped to [0, 1], scaled and rounded.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let [r, g, b] = self.to_rgb();
        [quantize(r), quantize(g), quantize(b)]
    }

    /// Packed `0xRRGGBB` projection.
    pub fn to_rgb24(&self) -> u32 {
        let [r, g, b] = self.to_rgb8();
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// Protanope (red-cone deficient) simulation of an LMS value.
    ///
    /// `l` is re-derived from `m` and `s`; the other channels are kept.
    ///
    /// # Errors
    ///
    /// [`Error::WrongSpace`] unless `self` is in [`ColorSpace::Lms`].
    ///
    /// ```rust
    /// use prism_core::{Color, ColorSpace};
    ///
    /// let seen = Color::rgb(1.0, 0.0, 0.0)
    ///     .convert(ColorSpace::Lms)
    ///     .to_protanope()
    ///     .unwrap();
    /// assert_eq!(seen.space(), ColorSpace::Lms);
    /// assert!(Color::rgb(1.0, 0.0, 0.0).to_protanope().is_err());
    /// ```
    pub fn to_protanope(&self) -> Result<Self> {
        if self.space != ColorSpace::Lms {
            return Err(Error::WrongSpace {
                expected: ColorSpace::Lms.name(),
                got: self.space.name(),
            });
        }
        let [_, m, s, _] = self.channels;
        Ok(Self::lms(PROTANOPE_M * m + PROTANOPE_S * s, m, s))
    }

    // ------------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------------

    /// Converts `other` into this space and combines channel by channel as
    /// `f(index, a, b)`.
    pub(crate) fn zip_with(&self, other: &Color, f: impl Fn(usize, f64, f64) -> f64) -> Self {
        let other = other.convert(self.space);
        let mut out = self.channels;
        for (i, (a, b)) in out
            .iter_mut()
            .zip(other.channels.iter())
            .take(self.arity())
            .enumerate()
        {
            *a = f(i, *a, *b);
        }
        Self::from_parts(self.space, out)
    }

    fn offset_by(&self, delta: &[f64], sign: f64) -> Result<Self> {
        if delta.len() != self.arity() {
            return Err(Error::DimensionMismatch {
                space: self.space.name(),
                expected: self.arity(),
                got: delta.len(),
            });
        }
        let mut out = self.channels;
        for (a, d) in out.iter_mut().zip(delta) {
            *a += sign * d;
        }
        Ok(Self::from_parts(self.space, out))
    }

    /// Channel-wise sum; `other` is first converted into this space.
    pub fn add(&self, other: &Color) -> Self {
        self.zip_with(other, |_, a, b| a + b)
    }

    /// Channel-wise difference; `other` is first converted into this space.
    pub fn sub(&self, other: &Color) -> Self {
        self.zip_with(other, |_, a, b| a - b)
    }

    /// Adds a raw delta vector.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `delta` is not `arity()` long.
    pub fn offset(&self, delta: &[f64]) -> Result<Self> {
        self.offset_by(delta, 1.0)
    }

    /// Subtracts a raw delta vector.
    pub fn offset_neg(&self, delta: &[f64]) -> Result<Self> {
        self.offset_by(delta, -1.0)
    }

    /// Multiplies every channel (hue included) by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        self.map_channels(|c| c * factor)
    }

    /// Applies `f` to every channel, staying in this space.
    pub fn map_channels(&self, f: impl Fn(f64) -> f64) -> Self {
        self.map_indexed(|_, c| f(c))
    }

    /// Applies `f(index, value)` to every channel, staying in this space.
    pub fn map_indexed(&self, f: impl Fn(usize, f64) -> f64) -> Self {
        let mut out = self.channels;
        for (i, c) in out.iter_mut().take(self.arity()).enumerate() {
            *c = f(i, *c);
        }
        Self::from_parts(self.space, out)
    }

    /// Bitwise XOR of the 8-bit RGB projections. Returns an RGB color.
    pub fn xor(&self, other: &Color) -> Self {
        let a = self.to_rgb8();
        let b = other.to_rgb8();
        Self::from_rgb8(a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2])
    }

    /// Mirrors the HSL lightness (`l -> 1 - l`). Returns an HSL color.
    pub fn invert_lightness(&self) -> Self {
        let [h, s, l, _] = self.convert(ColorSpace::Hsl).channels;
        Self::hsl(h, s, 1.0 - l)
    }
}

/// Clamps to [0, 1] and maps onto 0..=255. NaN maps to 0.
#[inline]
pub fn quantize(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.to_rgb8() == other.to_rgb8()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_rgb8().hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hsv = self.convert(ColorSpace::Hsv);
        write!(
            f,
            "HSV: [{:.4}, {:.4}, {:.4}]",
            hsv.channels[0], hsv.channels[1], hsv.channels[2]
        )
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Mutable staging area for a [`Color`].
///
/// ```rust
/// use prism_core::{ColorBuilder, ColorSpace};
///
/// let mut b = ColorBuilder::new(ColorSpace::Hsv);
/// b.set('h', 400.0)?.set('s', 1.0)?.set('v', 1.0)?;
/// let c = b.build();
/// assert_eq!(c.channels(), &[40.0, 1.0, 1.0]);
/// # Ok::<(), prism_core::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ColorBuilder {
    space: ColorSpace,
    channels: Channels,
}

impl ColorBuilder {
    /// Zeroed builder in `space`.
    pub fn new(space: ColorSpace) -> Self {
        Self {
            space,
            channels: [0.0; ColorSpace::MAX_CHANNELS],
        }
    }

    /// Sets a channel by label.
    pub fn set(&mut self, label: char, value: f64) -> Result<&mut Self> {
        let idx = self.space.require_channel(label)?;
        self.channels[idx] = value;
        Ok(self)
    }

    /// Sets a channel by index.
    pub fn set_index(&mut self, index: usize, value: f64) -> Result<&mut Self> {
        if index >= self.space.arity() {
            return Err(Error::DimensionMismatch {
                space: self.space.name(),
                expected: self.space.arity(),
                got: index + 1,
            });
        }
        self.channels[index] = value;
        Ok(self)
    }

    /// Adds `other` (converted into the builder's space) in place.
    pub fn add(&mut self, other: &Color) -> &mut Self {
        let other = other.convert(self.space);
        for (a, b) in self.channels.iter_mut().zip(other.channels.iter()) {
            *a += b;
        }
        self
    }

    /// Adds `weight * other` in place.
    pub fn add_weighted(&mut self, other: &Color, weight: f64) -> &mut Self {
        let other = other.convert(self.space);
        for (a, b) in self.channels.iter_mut().zip(other.channels.iter()) {
            *a += weight * b;
        }
        self
    }

    /// Multiplies every channel in place.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        for c in self.channels.iter_mut() {
            *c *= factor;
        }
        self
    }

    /// Space of the color under construction.
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    /// Finalizes into an immutable color, wrapping the hue.
    pub fn build(&self) -> Color {
        Color::from_parts(self.space, self.channels)
    }
}

impl From<Color> for ColorBuilder {
    fn from(c: Color) -> Self {
        Self {
            space: c.space,
            channels: c.channels,
        }
    }
}
