//! Blend-mode algebra.
//!
//! A [`BlendMode`] is a pure per-channel function `f(a, b)` where `a` is the
//! target channel and `b` the blend channel. [`Color::blend`] converts the
//! blend color into the target's space and applies the mode channel by
//! channel.
//!
//! The dividing modes (ColorBurn, ColorDodge, VividLight, LinearLight) can
//! produce infinities and NaN at `b = 0` or `b = 1`. What happens to those
//! is chosen by [`DivisionPolicy`], carried in a [`BlendConfig`]. Clamping
//! only touches channels whose nominal range is [0, 1]
//! (see [`ColorSpace::is_unit_channel`](crate::ColorSpace::is_unit_channel));
//! hue, YUV and LMS channels keep the raw result.
//!
//! # Default mode
//!
//! A process-wide default mode backs [`Color::blend_default`]. It starts as
//! [`BlendMode::Normal`]. Set it once at startup; tests restore the previous
//! value returned by [`set_default_blend_mode`].
//!
//! # Example
//!
//! ```rust
//! use prism_core::{BlendMode, Color};
//!
//! let base = Color::rgb(0.5, 0.25, 1.0);
//! let out = base.blend(&Color::rgb(0.5, 0.5, 0.5), BlendMode::Multiply);
//! assert_eq!(out, Color::rgb(0.25, 0.125, 0.5));
//! ```

use crate::{Color, Error};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Per-channel blend function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[repr(u8)]
pub enum BlendMode {
    /// `b`
    #[default]
    Normal,
    /// `a * b`
    Multiply,
    /// `1 - (1 - a)(1 - b)`
    Screen,
    /// `min(a, b)`
    Darken,
    /// `max(a, b)`
    Lighten,
    /// `1 - (1 - a) / b`
    ColorBurn,
    /// `a + b - 1`
    LinearBurn,
    /// `a / (1 - b)`
    ColorDodge,
    /// `a + b`
    LinearDodge,
    /// XOR of the 8-bit quantizations.
    Xor,
    /// Multiply or screen, keyed on the target.
    Overlay,
    /// Soft light, keyed on the blend.
    SoftLight,
    /// Multiply or screen, keyed on the blend.
    HardLight,
    /// Burn or dodge, keyed on the blend.
    VividLight,
    /// Linear burn or dodge, keyed on the blend.
    LinearLight,
    /// Darken or lighten, keyed on the blend.
    PinLight,
    /// `|a - b|`
    Difference,
    /// `0.5 - 2(a - 0.5)(b - 0.5)`
    Exclusion,
}

impl BlendMode {
    /// All modes in declaration order.
    pub const ALL: [BlendMode; 18] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorBurn,
        BlendMode::LinearBurn,
        BlendMode::ColorDodge,
        BlendMode::LinearDodge,
        BlendMode::Xor,
        BlendMode::Overlay,
        BlendMode::SoftLight,
        BlendMode::HardLight,
        BlendMode::VividLight,
        BlendMode::LinearLight,
        BlendMode::PinLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
    ];

    /// Kebab-case name, as accepted by `FromStr`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorBurn => "color-burn",
            Self::LinearBurn => "linear-burn",
            Self::ColorDodge => "color-dodge",
            Self::LinearDodge => "linear-dodge",
            Self::Xor => "xor",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
            Self::VividLight => "vivid-light",
            Self::LinearLight => "linear-light",
            Self::PinLight => "pin-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
        }
    }

    /// Whether the formula divides by `b` or `1 - b`.
    pub const fn divides(self) -> bool {
        matches!(
            self,
            Self::ColorBurn | Self::ColorDodge | Self::VividLight | Self::LinearLight
        )
    }

    /// Raw IEEE result of `f(a, b)`.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Normal => b,
            Self::Multiply => a * b,
            Self::Screen => 1.0 - (1.0 - a) * (1.0 - b),
            Self::Darken => a.min(b),
            Self::Lighten => a.max(b),
            Self::ColorBurn => 1.0 - (1.0 - a) / b,
            Self::LinearBurn => a + b - 1.0,
            Self::ColorDodge => a / (1.0 - b),
            Self::LinearDodge => a + b,
            Self::Xor => ((255.0 * a) as i64 ^ (255.0 * b) as i64) as f64 / 255.0,
            Self::Overlay => {
                if a > 0.5 {
                    1.0 - (1.0 - 2.0 * (a - 0.5)) * (1.0 - b)
                } else {
                    2.0 * a * b
                }
            }
            Self::SoftLight => {
                if b > 0.5 {
                    1.0 - (1.0 - a) * (1.0 - (b - 0.5))
                } else {
                    a * (b + 0.5)
                }
            }
            Self::HardLight => {
                if b > 0.5 {
                    1.0 - (1.0 - a) * (1.0 - 2.0 * (b - 0.5))
                } else {
                    2.0 * a * b
                }
            }
            Self::VividLight => {
                if b > 0.5 {
                    1.0 - (1.0 - a) / (2.0 * (b - 0.5))
                } else {
                    a / (1.0 - 2.0 * b)
                }
            }
            Self::LinearLight => {
                if b > 0.5 {
                    a + 2.0 * (b - 0.5)
                } else {
                    a / (1.0 - 2.0 * b)
                }
            }
            Self::PinLight => {
                if b > 0.5 {
                    a.max(2.0 * (b - 0.5))
                } else {
                    a.min(2.0 * b)
                }
            }
            Self::Difference => (a - b).abs(),
            Self::Exclusion => 0.5 - 2.0 * (a - 0.5) * (b - 0.5),
        }
    }

    fn from_u8(v: u8) -> Self {
        Self::ALL.get(usize::from(v)).copied().unwrap_or_default()
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = Error;

    /// Accepts `color-dodge`, `color_dodge`, `ColorDodge` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|m| m.name().replace('-', "") == key)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown blend mode: {s}")))
    }
}

/// What to do with the results of the dividing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DivisionPolicy {
    /// Clamp unit-range channels to [0, 1]; NaN becomes 0 there.
    #[default]
    Clamp,
    /// Keep raw IEEE results, infinities and NaN included.
    Propagate,
}

/// Mode plus division policy, threaded explicitly through blending calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlendConfig {
    /// Blend function.
    pub mode: BlendMode,
    /// Handling of division hazards.
    #[cfg_attr(feature = "serde", serde(default))]
    pub division: DivisionPolicy,
}

impl BlendConfig {
    /// Config with the default [`DivisionPolicy::Clamp`].
    pub const fn new(mode: BlendMode) -> Self {
        Self {
            mode,
            division: DivisionPolicy::Clamp,
        }
    }

    /// Replaces the division policy.
    pub const fn with_division(mut self, division: DivisionPolicy) -> Self {
        self.division = division;
        self
    }

    /// Applies the mode and then the division policy, for a channel whose
    /// nominal range is [0, 1].
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        self.apply_channel(a, b, true)
    }

    /// Applies the mode, then the division policy if `unit_range` is set.
    /// Channels outside [0, 1] keep the raw result.
    pub fn apply_channel(&self, a: f64, b: f64, unit_range: bool) -> f64 {
        let v = self.mode.apply(a, b);
        match self.division {
            DivisionPolicy::Clamp if unit_range && self.mode.divides() => {
                if v.is_nan() {
                    0.0
                } else {
                    v.clamp(0.0, 1.0)
                }
            }
            _ => v,
        }
    }
}

impl From<BlendMode> for BlendConfig {
    fn from(mode: BlendMode) -> Self {
        Self::new(mode)
    }
}

// ============================================================================
// Process-wide default
// ============================================================================

static DEFAULT_MODE: AtomicU8 = AtomicU8::new(BlendMode::Normal as u8);

/// The current process-wide default mode.
pub fn default_blend_mode() -> BlendMode {
    BlendMode::from_u8(DEFAULT_MODE.load(Ordering::Relaxed))
}

/// Replaces the process-wide default mode and returns the previous one.
pub fn set_default_blend_mode(mode: BlendMode) -> BlendMode {
    BlendMode::from_u8(DEFAULT_MODE.swap(mode as u8, Ordering::Relaxed))
}

// ============================================================================
// Color integration
// ============================================================================

impl Color {
    /// Blends `other` onto `self` with `mode` and the clamping policy.
    ///
    /// `other` is converted into `self`'s space first; the result stays in
    /// that space.
    pub fn blend(&self, other: &Color, mode: BlendMode) -> Color {
        self.blend_with(other, BlendConfig::new(mode))
    }

    /// Blends with an explicit configuration.
    pub fn blend_with(&self, other: &Color, config: BlendConfig) -> Color {
        let space = self.space();
        self.zip_with(other, |i, a, b| {
            config.apply_channel(a, b, space.is_unit_channel(i))
        })
    }

    /// Blends with the process-wide default mode.
    pub fn blend_default(&self, other: &Color) -> Color {
        self.blend(other, default_blend_mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorSpace;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_formulas() {
        let (a, b) = (0.6, 0.3);
        assert_eq!(BlendMode::Normal.apply(a, b), 0.3);
        assert_abs_diff_eq!(BlendMode::Multiply.apply(a, b), 0.18, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::Screen.apply(a, b), 0.72, epsilon = 1e-12);
        assert_eq!(BlendMode::Darken.apply(a, b), 0.3);
        assert_eq!(BlendMode::Lighten.apply(a, b), 0.6);
        assert_abs_diff_eq!(BlendMode::ColorBurn.apply(a, b), 1.0 - 0.4 / 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::LinearBurn.apply(a, b), -0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::ColorDodge.apply(a, b), 0.6 / 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::LinearDodge.apply(a, b), 0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::Overlay.apply(a, b), 1.0 - 0.8 * 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::SoftLight.apply(a, b), 0.48, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::HardLight.apply(a, b), 0.36, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::VividLight.apply(a, b), 0.6 / 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::LinearLight.apply(a, 0.8), 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::PinLight.apply(a, b), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::Difference.apply(a, b), 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(BlendMode::Exclusion.apply(a, b), 0.5 + 2.0 * 0.1 * 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_xor() {
        // 255 * 1.0 = 255, 255 * 0.2 = 51
        assert_abs_diff_eq!(BlendMode::Xor.apply(1.0, 0.2), f64::from(255 ^ 51) / 255.0);
        assert_eq!(BlendMode::Xor.apply(0.5, 0.5), 0.0);
    }

    #[test]
    fn test_division_policy() {
        let raw = BlendMode::ColorDodge.apply(0.5, 1.0);
        assert!(raw.is_infinite());

        let clamp = BlendConfig::new(BlendMode::ColorDodge);
        assert_eq!(clamp.apply(0.5, 1.0), 1.0);
        assert_eq!(BlendConfig::new(BlendMode::ColorBurn).apply(1.0, 0.0), 0.0);

        let prop = clamp.with_division(DivisionPolicy::Propagate);
        assert!(prop.apply(0.5, 1.0).is_infinite());
        assert!(prop.mode.divides());

        // non-dividing modes pass through unclamped
        assert_abs_diff_eq!(BlendConfig::new(BlendMode::LinearDodge).apply(0.8, 0.8), 1.6);
    }

    #[test]
    fn test_clamp_skips_wide_channels() {
        let dodge = BlendMode::ColorDodge;

        // s and v clamp, hue keeps the raw -200/99 and wraps
        let out = Color::hsv(200.0, 0.5, 0.5).blend(&Color::hsv(100.0, 1.0, 0.5), dodge);
        assert_eq!(out.space(), ColorSpace::Hsv);
        assert_abs_diff_eq!(out.channels()[0], 360.0 - 200.0 / 99.0, epsilon = 1e-9);
        assert_eq!(out.channels()[1], 1.0);
        assert_eq!(out.channels()[2], 1.0);

        // YUV runs 0-255, nothing is cut to 1
        let out = Color::yuv(100.0, 10.0, 10.0).blend(&Color::yuv(0.5, 0.0, 0.0), dodge);
        assert_abs_diff_eq!(out.channels()[0], 200.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.channels()[1], 10.0, epsilon = 1e-12);

        let burn = BlendConfig::new(BlendMode::ColorBurn);
        assert_eq!(burn.apply_channel(1.0, 0.0, true), 0.0);
        assert!(burn.apply_channel(0.5, 0.0, false).is_infinite());
    }

    #[test]
    fn test_parse() {
        assert_eq!("color-dodge".parse::<BlendMode>().unwrap(), BlendMode::ColorDodge);
        assert_eq!("ColorDodge".parse::<BlendMode>().unwrap(), BlendMode::ColorDodge);
        assert_eq!("pin_light".parse::<BlendMode>().unwrap(), BlendMode::PinLight);
        assert!("dissolve".parse::<BlendMode>().is_err());
        for mode in BlendMode::ALL {
            assert_eq!(mode.to_string().parse::<BlendMode>().unwrap(), mode);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_names() {
        for mode in BlendMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.name()));
            assert_eq!(serde_json::from_str::<BlendMode>(&json).unwrap(), mode);
        }
        assert_eq!(
            serde_json::to_string(&DivisionPolicy::Propagate).unwrap(),
            "\"propagate\""
        );

        let config: BlendConfig = serde_json::from_str(r#"{"mode":"vivid-light"}"#).unwrap();
        assert_eq!(config, BlendConfig::new(BlendMode::VividLight));
        assert!(serde_json::from_str::<BlendMode>("\"dissolve\"").is_err());
    }

    #[test]
    fn test_color_blend_converts() {
        let target = Color::hsv(0.0, 1.0, 1.0);
        let out = target.blend(&Color::rgb(0.0, 0.0, 1.0), BlendMode::Normal);
        assert_eq!(out.space(), ColorSpace::Hsv);
        assert_eq!(out, Color::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_identities() {
        let c = Color::rgb(0.2, 0.4, 0.6);
        assert_eq!(c.blend(&Color::rgb(1.0, 1.0, 1.0), BlendMode::Multiply), c);
        assert_eq!(c.blend(&Color::rgb(0.0, 0.0, 0.0), BlendMode::Screen), c);
        assert_eq!(c.blend(&c, BlendMode::Difference), Color::rgb(0.0, 0.0, 0.0));
    }
}
