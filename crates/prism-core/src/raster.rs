//! Two-dimensional grids of colors.
//!
//! A [`Raster`] stores its pixels in **row-major** order, top-to-bottom, plus
//! a single global alpha used by raster compositing:
//!
//! ```text
//! pixels: [p(0,0) p(1,0) ... p(w-1,0)]  <- row 0
//!         [p(0,1) p(1,1) ... p(w-1,1)]  <- row 1
//!         ...
//! ```
//!
//! Pixels are full [`Color`] values and need not share a space. Operations
//! never mutate a raster in place; they build a new one.
//!
//! # Usage
//!
//! ```rust
//! use prism_core::{Color, Raster};
//!
//! let data = [255u8, 0, 0, 0, 0, 255];
//! let r = Raster::from_rgb8(2, 1, &data)?;
//! assert_eq!(r.pixel(1, 0), Color::rgb(0.0, 0.0, 1.0));
//! assert_eq!(r.rgb24(0, 0), 0xFF0000);
//! assert_eq!(r.to_rgb8(), data);
//! # Ok::<(), prism_core::Error>(())
//! ```
//!
//! # Used By
//!
//! - `prism-ops` - filters and compositing

use crate::colorspace::ColorSpace;
use crate::{Color, Error, Result};

/// A width x height grid of colors with a global alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    alpha: f64,
}

impl Raster {
    fn check_size(width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyRaster { width, height });
        }
        Ok(())
    }

    /// Creates a raster filled with one color.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRaster`] if either dimension is zero.
    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self> {
        Self::check_size(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![color; width * height],
            alpha: 1.0,
        })
    }

    /// Creates a raster from row-major pixels.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRaster`] for a zero dimension, [`Error::SizeMismatch`]
    /// if `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        Self::check_size(width, height)?;
        if pixels.len() != width * height {
            return Err(Error::size_mismatch((width, height), (pixels.len(), 1)));
        }
        Ok(Self {
            width,
            height,
            pixels,
            alpha: 1.0,
        })
    }

    /// Creates a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> Color,
    {
        Self::check_size(width, height)?;
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
            alpha: 1.0,
        })
    }

    /// Creates an RGB raster from packed 8-bit triples (row-major).
    ///
    /// # Errors
    ///
    /// [`Error::EmptyRaster`] for a zero dimension, [`Error::InvalidParameter`]
    /// if `data` is not `width * height * 3` bytes.
    pub fn from_rgb8(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        Self::check_size(width, height)?;
        if data.len() != width * height * 3 {
            return Err(Error::InvalidParameter(format!(
                "{width}x{height} RGB raster needs {} bytes, got {}",
                width * height * 3,
                data.len()
            )));
        }
        let pixels = data
            .chunks_exact(3)
            .map(|p| Color::from_rgb8(p[0], p[1], p[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
            alpha: 1.0,
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Global alpha, 1.0 unless set.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns a copy with a different global alpha.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self {
            alpha,
            ..self.clone()
        }
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    /// Pixel at `(x, y)` with bounds checking.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Pixel at signed coordinates, `None` outside the raster.
    #[inline]
    pub fn get_signed(&self, x: isize, y: isize) -> Option<Color> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get_pixel(x as usize, y as usize)
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: usize) -> &[Color] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Iterates over `(x, y, color)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        let w = self.width;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, c)| (i % w, i / w, *c))
    }

    // ------------------------------------------------------------------------
    // Sinks
    // ------------------------------------------------------------------------

    /// Packed `0xRRGGBB` of the pixel at `(x, y)`.
    #[inline]
    pub fn rgb24(&self, x: usize, y: usize) -> u32 {
        self.pixel(x, y).to_rgb24()
    }

    /// Packed 8-bit RGB triples, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgb8()).collect()
    }

    // ------------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------------

    /// New raster with `f` applied to each pixel; alpha is kept.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(usize, usize, Color) -> Color,
    {
        let pixels = self.iter().map(|(x, y, c)| f(x, y, c)).collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
            alpha: self.alpha,
        }
    }

    /// New raster with every pixel converted into `space`.
    pub fn convert(&self, space: ColorSpace) -> Self {
        self.map(|_, _, c| c.convert(space))
    }

    /// Replaces the pixel buffer, keeping dimensions and alpha.
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] if the buffer length is wrong.
    pub fn with_pixels(&self, pixels: Vec<Color>) -> Result<Self> {
        Ok(Self::from_pixels(self.width, self.height, pixels)?.with_alpha(self.alpha))
    }
}
