//! Interpolation and angle utilities.
//!
//! - [`lerp`] - linear interpolation (extrapolates outside [0, 1])
//! - [`wrap`] - Euclidean modulo into `[0, period)`
//! - [`cos_deg`], [`acos_deg`] - trigonometry in degrees

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// # Example
///
/// ```rust
/// use prism_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(0.0, 10.0, 2.0), 20.0);
/// ```
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Wraps `value` into `[0, period)`, re-wrapping negative inputs.
///
/// # Example
///
/// ```rust
/// use prism_math::wrap;
///
/// assert_eq!(wrap(370.0, 360.0), 10.0);
/// assert_eq!(wrap(-10.0, 360.0), 350.0);
/// ```
#[inline]
pub fn wrap(value: f64, period: f64) -> f64 {
    let w = value.rem_euclid(period);
    // rem_euclid rounds tiny negative inputs up to exactly `period`
    if w >= period { 0.0 } else { w }
}

/// Cosine of an angle given in degrees.
#[inline]
pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Arc cosine in degrees. The argument is clamped to [-1, 1].
#[inline]
pub fn acos_deg(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos().to_degrees()
}
