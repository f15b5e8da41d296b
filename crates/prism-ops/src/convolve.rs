//! Convolution kernels and the convolution filter.
//!
//! # Kernels
//!
//! - [`Kernel::box_blur`] - all-ones square (mean filter)
//! - [`Kernel::disc`] - ones inside the inscribed ellipse
//! - [`Kernel::motion_blur`] - a rasterised line segment through the center
//!
//! # Boundary policy
//!
//! Kernel cells that fall outside the raster are skipped, never clamped or
//! wrapped. With `preserve_average` the sum is divided by the weights that
//! were actually used, so edge pixels keep their brightness.
//!
//! # Example
//!
//! ```rust
//! use prism_core::{Color, Raster};
//! use prism_ops::convolve::{Convolution, Kernel};
//! use prism_ops::filter::apply;
//!
//! let src = Raster::filled(8, 8, Color::rgb(0.2, 0.4, 0.6))?;
//! let blur = Convolution::new(Kernel::box_blur(3)?, 1.0, true);
//! let out = apply(&src, &blur)?;
//! assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
//! # Ok::<(), prism_ops::OpsError>(())
//! ```

use crate::filter::Filter;
use crate::{OpsError, OpsResult};
use prism_core::{Color, ColorBuilder, Raster};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;
use tracing::debug;

/// Angular tolerance for the closed-form motion blur cases, in radians.
const ANGLE_EPSILON: f64 = 1e-9;

/// Convolution kernel.
///
/// Weights are stored row-major: `data[j * width + i]` is the weight applied
/// at horizontal offset `i` and vertical offset `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] for a zero dimension or a length that
    /// is not `width * height`.
    pub fn new(data: Vec<f64>, width: usize, height: usize) -> OpsResult<Self> {
        if width == 0 || height == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel size must be positive, got {width}x{height}"
            )));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    fn check_size(size: usize, what: &str) -> OpsResult<()> {
        if size < 1 {
            return Err(OpsError::InvalidParameter(format!(
                "{what} size must be a positive integer"
            )));
        }
        Ok(())
    }

    /// All-ones `size x size` kernel. Pair with `preserve_average` for a mean.
    ///
    /// ```rust
    /// use prism_ops::convolve::Kernel;
    ///
    /// let k = Kernel::box_blur(3).unwrap();
    /// assert_eq!(k.width(), 3);
    /// assert_eq!(k.sum(), 9.0);
    /// ```
    pub fn box_blur(size: usize) -> OpsResult<Self> {
        Self::check_size(size, "box blur")?;
        Ok(Self {
            data: vec![1.0; size * size],
            width: size,
            height: size,
        })
    }

    /// Ones inside the ellipse inscribed in a `width x height` box.
    ///
    /// A cell is inside when its center satisfies
    /// `((i + 0.5) / w - 0.5)^2 / 0.25 + ((j + 0.5) / h - 0.5)^2 / 0.25 <= 1`.
    pub fn disc(width: usize, height: usize) -> OpsResult<Self> {
        Self::check_size(width.min(height), "disc")?;
        let mut k = Self::zeros(width, height);
        for j in 0..height {
            let dy = ((j as f64 + 0.5) / height as f64 - 0.5) / 0.5;
            for i in 0..width {
                let dx = ((i as f64 + 0.5) / width as f64 - 0.5) / 0.5;
                if dx * dx + dy * dy <= 1.0 {
                    k.data[j * width + i] = 1.0;
                }
            }
        }
        debug!(width, height, weight = k.sum(), "disc kernel");
        Ok(k)
    }

    /// Square `length x length` kernel holding a line through the center at
    /// `angle` radians (counter-clockwise, y down).
    ///
    /// Angles are taken modulo pi. 0, pi/4, pi/2 and 3pi/4 use exact
    /// closed forms; every other angle is rasterised with Bresenham.
    ///
    /// ```rust
    /// use prism_ops::convolve::Kernel;
    ///
    /// let k = Kernel::motion_blur(0.0, 5).unwrap();
    /// assert!((0..5).all(|i| k.get(i, 2) == 1.0));
    /// assert_eq!(k.sum(), 5.0);
    /// ```
    pub fn motion_blur(angle: f64, length: usize) -> OpsResult<Self> {
        Self::check_size(length, "motion blur")?;
        if !angle.is_finite() {
            return Err(OpsError::InvalidParameter(format!(
                "motion blur angle must be finite, got {angle}"
            )));
        }
        let size = length;
        let a = angle.rem_euclid(PI);
        let near = |target: f64| (a - target).abs() < ANGLE_EPSILON || (a - target - PI).abs() < ANGLE_EPSILON;

        let mut k = Self::zeros(size, size);
        if near(0.0) {
            let y = size / 2;
            for x in 0..size {
                k.set(x, y);
            }
        } else if near(FRAC_PI_2) {
            let x = size / 2;
            for y in 0..size {
                k.set(x, y);
            }
        } else if near(FRAC_PI_4) {
            for i in 0..size {
                k.set(i, size - 1 - i);
            }
        } else if near(3.0 * FRAC_PI_4) {
            for i in 0..size {
                k.set(i, i);
            }
        } else {
            let c = (size - 1) as f64 / 2.0;
            let (sin, cos) = a.sin_cos();
            let t = c / cos.abs().max(sin.abs());
            let x0 = (c - t * cos).round() as i64;
            let y0 = (c + t * sin).round() as i64;
            let x1 = (c + t * cos).round() as i64;
            let y1 = (c - t * sin).round() as i64;
            k.line(x0, y0, x1, y1);
        }
        debug!(angle, length, weight = k.sum(), "motion blur kernel");
        Ok(k)
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize) {
        self.data[j * self.width + i] = 1.0;
    }

    /// Bresenham line from `(x0, y0)` to `(x1, y1)`, clipped to the kernel.
    fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            if (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y) {
                self.set(x as usize, y as usize);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Width (horizontal extent).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height (vertical extent).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Weight at horizontal offset `i`, vertical offset `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[j * self.width + i]
    }

    /// Row-major weights.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Nominal sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.width) {
            let cells: Vec<String> = row.iter().map(|w| format!("{w}")).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Weighted sum over a kernel window.
///
/// For output pixel `(x, y)` the sum runs over
/// `K(i, j) * pixel(x - kw/2 + i, y - kh/2 + j)` for in-bounds cells only.
/// The sum is taken in the space of the first in-bounds pixel, with the
/// others converted into it. It is then divided by the used weight sum when
/// `preserve_average` is set (a used sum of exactly 0 divides by 1) and
/// multiplied by `factor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Convolution {
    /// Weights.
    pub kernel: Kernel,
    /// Final scale.
    pub factor: f64,
    /// Divide by the sum of the weights actually used.
    pub preserve_average: bool,
}

impl Convolution {
    /// Creates a convolution filter.
    pub fn new(kernel: Kernel, factor: f64, preserve_average: bool) -> Self {
        Self {
            kernel,
            factor,
            preserve_average,
        }
    }

    /// Mean over a `size x size` box.
    pub fn mean(size: usize) -> OpsResult<Self> {
        Ok(Self::new(Kernel::box_blur(size)?, 1.0, true))
    }

    /// Mean over an elliptical `width x height` window.
    pub fn disc_blur(width: usize, height: usize) -> OpsResult<Self> {
        Ok(Self::new(Kernel::disc(width, height)?, 1.0, true))
    }

    /// Directional blur of `length` pixels at `angle` radians.
    pub fn motion_blur(angle: f64, length: usize) -> OpsResult<Self> {
        Ok(Self::new(Kernel::motion_blur(angle, length)?, 1.0, true))
    }
}

impl Filter for Convolution {
    fn filter(&self, x: usize, y: usize, raster: &Raster) -> OpsResult<Color> {
        let (rx, ry) = self.kernel.radius();
        let mut acc: Option<ColorBuilder> = None;
        let mut used = 0.0;

        for j in 0..self.kernel.height {
            let sy = y as isize - ry as isize + j as isize;
            for i in 0..self.kernel.width {
                let sx = x as isize - rx as isize + i as isize;
                let Some(p) = raster.get_signed(sx, sy) else {
                    continue;
                };
                let w = self.kernel.get(i, j);
                acc.get_or_insert_with(|| ColorBuilder::new(p.space()))
                    .add_weighted(&p, w);
                used += w;
            }
        }

        let Some(mut acc) = acc else {
            return Ok(raster.pixel(x, y));
        };
        let divisor = if self.preserve_average && used != 0.0 {
            used
        } else {
            1.0
        };
        Ok(acc.scale(self.factor / divisor).build())
    }
}
