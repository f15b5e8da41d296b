//! Order-statistic filters.
//!
//! [`Median`] is the per-channel median: every channel of the window is
//! sorted on its own and the middle value taken. [`RankMedian`] instead sorts
//! whole colors by a key and returns the middle color unchanged. The two
//! agree on grey data and differ when channels are not ordered together.
//!
//! ```rust
//! use prism_core::{Color, Raster};
//! use prism_ops::filter::apply;
//! use prism_ops::median::Median;
//!
//! // a single hot pixel is removed
//! let src = Raster::from_fn(3, 3, |x, y| Color::grey(if (x, y) == (1, 1) { 1.0 } else { 0.2 }))?;
//! let out = apply(&src, &Median::new(3)?)?;
//! assert_eq!(out.pixel(1, 1), Color::grey(0.2));
//! # Ok::<(), prism_ops::OpsError>(())
//! ```

use crate::filter::Filter;
use crate::{OpsError, OpsResult};
use prism_core::{Color, ColorSpace, Error, Raster};

fn check_size(size: usize) -> OpsResult<()> {
    if size < 1 {
        return Err(OpsError::InvalidParameter(
            "median window size must be a positive integer".into(),
        ));
    }
    Ok(())
}

/// In-bounds neighbors of `(x, y)` in a `size x size` window.
fn window(raster: &Raster, x: usize, y: usize, size: usize) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
    let r = (size / 2) as isize;
    let (x, y) = (x as isize, y as isize);
    (0..size as isize).flat_map(move |j| {
        (0..size as isize).filter_map(move |i| {
            let (sx, sy) = (x - r + i, y - r + j);
            raster
                .get_signed(sx, sy)
                .map(|c| (sx as usize, sy as usize, c))
        })
    })
}

/// Middle of a sorted slice; the mean of the two middle values for even
/// lengths.
fn middle(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Per-channel median over a square window.
///
/// All sampled pixels must share the center pixel's space (and so its
/// arity); otherwise the filter fails with `InconsistentRaster`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Median {
    size: usize,
}

impl Median {
    /// Median over a `size x size` window centered on each pixel.
    pub fn new(size: usize) -> OpsResult<Self> {
        check_size(size)?;
        Ok(Self { size })
    }

    /// Window side.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Filter for Median {
    fn filter(&self, x: usize, y: usize, raster: &Raster) -> OpsResult<Color> {
        let reference = raster.pixel(x, y);
        let space = reference.space();
        let arity = reference.arity();

        let mut lanes: Vec<Vec<f64>> = vec![Vec::with_capacity(self.size * self.size); arity];
        for (sx, sy, c) in window(raster, x, y, self.size) {
            if c.space() != space || c.arity() != arity {
                return Err(Error::inconsistent(
                    sx,
                    sy,
                    format!(
                        "median window at ({x}, {y}) expects {space} with {arity} channels, found {} with {}",
                        c.space(),
                        c.arity()
                    ),
                )
                .into());
            }
            for (lane, v) in lanes.iter_mut().zip(c.channels()) {
                lane.push(*v);
            }
        }

        let mut out = [0.0; ColorSpace::MAX_CHANNELS];
        for (o, lane) in out.iter_mut().zip(lanes.iter_mut()) {
            lane.sort_by(f64::total_cmp);
            *o = middle(lane);
        }
        Ok(Color::new(space, &out[..arity])?)
    }
}

/// Whole-color median: sorts the window by `key` and returns the middle
/// color as it is.
///
/// Pixels of mixed spaces are allowed; `key` sees each color as stored.
#[derive(Clone, Copy)]
pub struct RankMedian<F> {
    size: usize,
    key: F,
}

impl<F> RankMedian<F>
where
    F: Fn(&Color) -> f64 + Send + Sync,
{
    /// Rank median over a `size x size` window, ordered by `key`.
    pub fn new(size: usize, key: F) -> OpsResult<Self> {
        check_size(size)?;
        Ok(Self { size, key })
    }
}

impl RankMedian<fn(&Color) -> f64> {
    /// Rank median ordered by HSV value.
    pub fn by_value(size: usize) -> OpsResult<Self> {
        fn value(c: &Color) -> f64 {
            c.convert(ColorSpace::Grey).channels()[0]
        }
        Self::new(size, value as fn(&Color) -> f64)
    }
}

impl<F> std::fmt::Debug for RankMedian<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankMedian").field("size", &self.size).finish()
    }
}

impl<F> Filter for RankMedian<F>
where
    F: Fn(&Color) -> f64 + Send + Sync,
{
    fn filter(&self, x: usize, y: usize, raster: &Raster) -> OpsResult<Color> {
        let mut ranked: Vec<(f64, Color)> = window(raster, x, y, self.size)
            .map(|(_, _, c)| ((self.key)(&c), c))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(ranked[ranked.len() / 2].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::apply;
    use approx::assert_abs_diff_eq;

    fn grey_grid(values: [f64; 9]) -> Raster {
        Raster::from_fn(3, 3, |x, y| Color::grey(values[y * 3 + x])).unwrap()
    }

    #[test]
    fn test_outlier_rejected() {
        let src = grey_grid([0.0, 50.0, 50.0, 50.0, 255.0, 50.0, 50.0, 50.0, 50.0]);
        let out = Median::new(3).unwrap().filter(1, 1, &src).unwrap();
        assert_eq!(out.channels(), &[50.0]);
    }

    #[test]
    fn test_even_count_averages() {
        // corner window holds 4 pixels: 1, 2, 4, 5
        let src = grey_grid([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let out = Median::new(3).unwrap().filter(0, 0, &src).unwrap();
        assert_eq!(out.channels(), &[3.0]);
        let edge = Median::new(3).unwrap().filter(1, 0, &src).unwrap();
        assert_eq!(edge.channels(), &[3.5]);
    }

    #[test]
    fn test_per_channel() {
        let colors = [
            Color::rgb(0.9, 0.1, 0.5),
            Color::rgb(0.1, 0.9, 0.5),
            Color::rgb(0.5, 0.5, 0.1),
        ];
        let src = Raster::from_fn(3, 1, |x, _| colors[x]).unwrap();
        let out = Median::new(3).unwrap().filter(1, 0, &src).unwrap();
        // each channel sorted on its own
        assert_eq!(out.channels(), &[0.5, 0.5, 0.5]);

        let ranked = RankMedian::new(3, |c: &Color| c.channels()[0]).unwrap();
        assert_eq!(ranked.filter(1, 0, &src).unwrap().channels(), &[0.5, 0.5, 0.1]);
    }

    #[test]
    fn test_inconsistent_space() {
        let src = Raster::from_fn(3, 3, |x, y| {
            if (x, y) == (2, 2) {
                Color::hsv(0.0, 0.0, 0.5)
            } else {
                Color::rgb(0.5, 0.5, 0.5)
            }
        })
        .unwrap();
        let m = Median::new(3).unwrap();
        let err = m.filter(1, 1, &src).unwrap_err();
        match err.as_core() {
            Some(Error::InconsistentRaster { x, y, reason }) => {
                assert_eq!((*x, *y), (2, 2));
                assert!(reason.contains("HSV"));
            }
            other => panic!("unexpected {other:?}"),
        }
        // the bad pixel is outside this window
        assert!(m.filter(0, 0, &src).is_ok());
        assert!(apply(&src, &m).is_err());
    }

    #[test]
    fn test_rank_median_mixed_spaces() {
        let src = Raster::from_fn(3, 1, |x, _| match x {
            0 => Color::grey(0.1),
            1 => Color::rgb(0.9, 0.9, 0.9),
            _ => Color::hsl(0.0, 0.0, 0.5),
        })
        .unwrap();
        let out = RankMedian::by_value(3).unwrap().filter(1, 0, &src).unwrap();
        assert_eq!(out.space(), ColorSpace::Hsl);
        assert_abs_diff_eq!(out.channel('l').unwrap(), 0.5);
    }

    #[test]
    fn test_size_one_is_identity() {
        let src = grey_grid([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let out = apply(&src, &Median::new(1).unwrap()).unwrap();
        assert_eq!(out, src);
        assert!(Median::new(0).is_err());
    }
}
