//! Row-parallel filter application using Rayon.
//!
//! Filters only read the source raster, so every output row can be computed
//! on its own thread. Results are identical to [`crate::filter::apply`].
//!
//! # Example
//!
//! ```rust
//! use prism_core::{Color, Raster};
//! use prism_ops::{convolve::Convolution, filter, parallel};
//!
//! let src = Raster::from_fn(64, 64, |x, y| Color::grey(((x ^ y) & 1) as f64))?;
//! let blur = Convolution::mean(3)?;
//! assert_eq!(parallel::apply(&src, &blur)?, filter::apply(&src, &blur)?);
//! # Ok::<(), prism_ops::OpsError>(())
//! ```

use crate::filter::Filter;
use crate::OpsResult;
use prism_core::{Color, Raster};
use rayon::prelude::*;
use tracing::trace;

/// Parallel version of [`crate::filter::apply`].
///
/// If several pixels fail, which error is returned is unspecified.
pub fn apply<F: Filter + ?Sized>(raster: &Raster, filter: &F) -> OpsResult<Raster> {
    let (width, height) = raster.dimensions();
    trace!(width, height, "parallel::apply");

    let mut pixels = vec![Color::default(); width * height];
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, row)| -> OpsResult<()> {
            for (x, out) in row.iter_mut().enumerate() {
                *out = filter.filter(x, y, raster)?;
            }
            Ok(())
        })?;
    Ok(raster.with_pixels(pixels)?)
}

/// Parallel [`Raster::map`].
pub fn map<F>(raster: &Raster, f: F) -> OpsResult<Raster>
where
    F: Fn(usize, usize, Color) -> Color + Send + Sync,
{
    let width = raster.width();
    let pixels: Vec<Color> = raster
        .pixels()
        .par_iter()
        .enumerate()
        .map(|(i, c)| f(i % width, i / width, *c))
        .collect();
    Ok(raster.with_pixels(pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convolve::Convolution;
    use crate::filter::PointFilter;
    use crate::median::Median;
    use crate::point::{HueShift, Noise};
    use crate::{OpsError, filter};

    fn source() -> Raster {
        Raster::from_fn(37, 23, |x, y| {
            Color::rgb(x as f64 / 37.0, y as f64 / 23.0, ((x * y) % 7) as f64 / 7.0)
        })
        .unwrap()
        .with_alpha(0.8)
    }

    #[test]
    fn test_matches_sequential() {
        let src = source();
        let noise = Noise::new(0.05, 3);
        let seq = filter::apply(&src, &noise).unwrap();
        let par = apply(&src, &noise).unwrap();
        for (a, b) in seq.pixels().iter().zip(par.pixels()) {
            assert_eq!(a.channels(), b.channels());
        }
        assert_eq!(par.alpha(), 0.8);

        assert_eq!(
            apply(&src, &Convolution::motion_blur(0.4, 5).unwrap()).unwrap(),
            filter::apply(&src, &Convolution::motion_blur(0.4, 5).unwrap()).unwrap()
        );
        assert_eq!(
            apply(&src, &Median::new(3).unwrap()).unwrap(),
            filter::apply(&src, &Median::new(3).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_error_propagates() {
        struct Broken;
        impl Filter for Broken {
            fn filter(&self, x: usize, _y: usize, raster: &Raster) -> OpsResult<Color> {
                if x == 5 {
                    Err(OpsError::InvalidParameter("column 5".into()))
                } else {
                    Ok(raster.pixel(x, 0))
                }
            }
        }
        assert!(apply(&source(), &Broken).is_err());
    }

    #[test]
    fn test_map() {
        let src = source();
        let shift = HueShift::new(90.0);
        let out = map(&src, |x, y, c| shift.filter_pixel(x, y, &c)).unwrap();
        assert_eq!(out, filter::apply(&src, &shift).unwrap());
    }
}
