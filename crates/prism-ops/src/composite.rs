//! Raster compositing.
//!
//! Two rasters combine with premultiplied global alpha:
//!
//! ```text
//! alpha = a1 + a2 - a1 * a2
//! pixel = ((pA * a1) blend (pB * a2)) / alpha
//! ```
//!
//! `blend` is the configured [`BlendMode`](prism_core::BlendMode) with its
//! division policy. The alpha scaling and the blend happen on the RGB
//! projection of each pixel, so a hue in degrees is never multiplied. The
//! result is converted back into `pA`'s space and carries `alpha`.
//!
//! # Example
//!
//! ```rust
//! use prism_core::{BlendConfig, BlendMode, Color, Raster};
//! use prism_ops::composite::blend_rasters;
//!
//! let a = Raster::filled(2, 2, Color::rgb(0.5, 0.5, 0.5))?;
//! let b = Raster::filled(2, 2, Color::rgb(1.0, 0.0, 0.5))?;
//! let out = blend_rasters(&a, &b, BlendConfig::new(BlendMode::Multiply))?;
//! assert_eq!(out.alpha(), 1.0);
//! assert_eq!(out.pixel(0, 0), Color::rgb(0.5, 0.0, 0.25));
//! # Ok::<(), prism_ops::OpsError>(())
//! ```

use crate::OpsResult;
use prism_core::{BlendConfig, Color, ColorSpace, Error, Raster};
use tracing::{debug, trace};

/// Combined alpha below which the result is treated as fully transparent.
const ALPHA_EPSILON: f64 = 1e-8;

/// Fails with `SizeMismatch` unless both rasters have the same dimensions.
fn check_same_size(a: &Raster, b: &Raster) -> OpsResult<()> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::size_mismatch(a.dimensions(), b.dimensions()).into());
    }
    Ok(())
}

/// Builds a raster from `f(x, y, a_pixel, b_pixel)`.
///
/// The result has `a`'s alpha.
pub fn map_pair<F>(a: &Raster, b: &Raster, f: F) -> OpsResult<Raster>
where
    F: Fn(usize, usize, Color, Color) -> Color,
{
    check_same_size(a, b)?;
    let (width, height) = a.dimensions();
    trace!(width, height, "composite::map_pair");
    let pixels = a
        .iter()
        .zip(b.pixels())
        .map(|((x, y, pa), pb)| f(x, y, pa, *pb))
        .collect();
    Ok(a.with_pixels(pixels)?)
}

/// Composites `b` onto `a` with premultiplied global alpha.
///
/// Pixels stay in `a`'s spaces; rasters that compare equal composite to
/// equal results whatever space their pixels are stored in. When both
/// alphas are 0 the result is a transparent black raster.
pub fn blend_rasters(a: &Raster, b: &Raster, config: BlendConfig) -> OpsResult<Raster> {
    let (a1, a2) = (a.alpha(), b.alpha());
    let alpha = a1 + a2 - a1 * a2;
    debug!(a1, a2, alpha, mode = %config.mode, "blend_rasters");

    if alpha < ALPHA_EPSILON {
        check_same_size(a, b)?;
        let (w, h) = a.dimensions();
        return Ok(Raster::filled(w, h, Color::default())?.with_alpha(0.0));
    }

    let inv = 1.0 / alpha;
    let out = map_pair(a, b, |_, _, pa, pb| {
        let top = pb.convert(ColorSpace::Rgb).scale(a2);
        pa.convert(ColorSpace::Rgb)
            .scale(a1)
            .blend_with(&top, config)
            .scale(inv)
            .convert(pa.space())
    })?;
    Ok(out.with_alpha(alpha))
}
