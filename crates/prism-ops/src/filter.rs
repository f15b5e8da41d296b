//! Filter contract and raster application.
//!
//! Every filter computes the new color of one pixel from read-only access to
//! the whole source raster. Pixels are independent, so applying a filter is
//! order-free and can run row-parallel (see `crate::parallel`).
//!
//! - [`Filter`] - neighborhood-aware filters (convolution, median, vignette)
//! - [`PointFilter`] - filters that only look at the pixel itself
//! - [`Pipeline`] - a sequence of filters applied one raster after another
//!
//! # Example
//!
//! ```rust
//! use prism_core::{Color, Raster};
//! use prism_ops::filter::{apply, Pipeline};
//! use prism_ops::point::{HueShift, InvertLightness};
//!
//! let src = Raster::filled(4, 4, Color::rgb(1.0, 0.0, 0.0))?;
//! let shifted = apply(&src, &HueShift::new(120.0))?;
//! assert_eq!(shifted.pixel(0, 0), Color::rgb(0.0, 1.0, 0.0));
//!
//! let out = Pipeline::new()
//!     .then(HueShift::new(120.0))
//!     .then(InvertLightness)
//!     .run(&src)?;
//! assert_eq!(out.dimensions(), (4, 4));
//! # Ok::<(), prism_ops::OpsError>(())
//! ```

use crate::OpsResult;
use prism_core::{Color, Raster};
use tracing::trace;

/// Computes the new color of pixel `(x, y)`.
pub trait Filter: Send + Sync {
    /// New color for `(x, y)`, given the full source raster.
    fn filter(&self, x: usize, y: usize, raster: &Raster) -> OpsResult<Color>;
}

/// A filter that depends only on the pixel at `(x, y)`.
///
/// Every `PointFilter` is a [`Filter`].
pub trait PointFilter: Send + Sync {
    /// New color for a pixel; `x` and `y` are its coordinates.
    fn filter_pixel(&self, x: usize, y: usize, color: &Color) -> Color;
}

impl<P: PointFilter> Filter for P {
    #[inline]
    fn filter(&self, x: usize, y: usize, raster: &Raster) -> OpsResult<Color> {
        Ok(self.filter_pixel(x, y, &raster.pixel(x, y)))
    }
}

/// Applies `filter` to every pixel and returns the new raster.
///
/// The result keeps the source alpha.
pub fn apply<F: Filter + ?Sized>(raster: &Raster, filter: &F) -> OpsResult<Raster> {
    let (width, height) = raster.dimensions();
    trace!(width, height, "filter::apply");

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push(filter.filter(x, y, raster)?);
        }
    }
    Ok(raster.with_pixels(pixels)?)
}

/// Ordered list of filters, each applied to the previous stage's output.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Filter>>,
}

impl Pipeline {
    /// Empty pipeline; running it returns a copy of the input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage.
    pub fn then<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.stages.push(Box::new(filter));
        self
    }

    /// Appends an already boxed stage.
    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.stages.push(filter);
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether there are no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs every stage in order.
    pub fn run(&self, raster: &Raster) -> OpsResult<Raster> {
        trace!(stages = self.stages.len(), "pipeline::run");
        let mut current = raster.clone();
        for stage in &self.stages {
            current = apply(&current, stage.as_ref())?;
        }
        Ok(current)
    }

    /// Runs every stage in order, each one row-parallel.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self, raster: &Raster) -> OpsResult<Raster> {
        trace!(stages = self.stages.len(), "pipeline::run_parallel");
        let mut current = raster.clone();
        for stage in &self.stages {
            current = crate::parallel::apply(&current, stage.as_ref())?;
        }
        Ok(current)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpsError;
    use prism_core::ColorSpace;

    struct Swap;

    impl PointFilter for Swap {
        fn filter_pixel(&self, _x: usize, _y: usize, c: &Color) -> Color {
            let [r, g, b] = c.to_rgb();
            Color::rgb(b, g, r)
        }
    }

    struct LeftNeighbor;

    impl Filter for LeftNeighbor {
        fn filter(&self, x: usize, y: usize, raster: &Raster) -> OpsResult<Color> {
            Ok(raster.pixel(x.saturating_sub(1), y))
        }
    }

    struct Fails;

    impl Filter for Fails {
        fn filter(&self, _x: usize, _y: usize, _raster: &Raster) -> OpsResult<Color> {
            Err(OpsError::InvalidParameter("nope".into()))
        }
    }

    fn ramp() -> Raster {
        Raster::from_fn(4, 3, |x, y| Color::grey((x + y * 4) as f64 / 12.0)).unwrap()
    }

    #[test]
    fn test_point_filter_blanket() {
        let src = Raster::filled(2, 2, Color::rgb(1.0, 0.0, 0.0)).unwrap().with_alpha(0.25);
        let out = apply(&src, &Swap).unwrap();
        assert_eq!(out.pixel(1, 1), Color::rgb(0.0, 0.0, 1.0));
        assert_eq!(out.alpha(), 0.25);
    }

    #[test]
    fn test_reads_source_not_output() {
        let src = ramp();
        let out = apply(&src, &LeftNeighbor).unwrap();
        // shifted by exactly one, not smeared across the row
        assert_eq!(out.pixel(3, 0), src.pixel(2, 0));
        assert_eq!(out.pixel(0, 2), src.pixel(0, 2));
    }

    #[test]
    fn test_error_propagates() {
        assert!(apply(&ramp(), &Fails).is_err());
        let p = Pipeline::new().then(Swap).then(Fails);
        assert_eq!(p.len(), 2);
        assert!(p.run(&ramp()).is_err());
    }

    #[test]
    fn test_pipeline_order() {
        let src = ramp();
        let p = Pipeline::new().then(LeftNeighbor).then(LeftNeighbor);
        let out = p.run(&src).unwrap();
        assert_eq!(out.pixel(3, 1), src.pixel(1, 1));
        assert!(Pipeline::new().run(&src).unwrap() == src);
        assert!(out.pixels().iter().all(|c| c.space() == ColorSpace::Grey));
    }
}
