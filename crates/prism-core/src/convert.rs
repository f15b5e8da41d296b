//! Conversion graph between color spaces.
//!
//! RGB is the hub. Every space implements a `to_rgb` and a `from_rgb` leg and
//! any other pair is routed `source -> RGB -> target`. There are no direct
//! edges between non-hub spaces.
//!
//! Channel vectors are passed around as fixed [`Channels`] arrays; entries past
//! the arity of the space are zero.
//!
//! # Example
//!
//! ```rust
//! use prism_core::ColorSpace;
//! use prism_core::convert::{convert, from_rgb};
//!
//! let hsv = from_rgb(ColorSpace::Hsv, [1.0, 0.0, 0.0]);
//! assert_eq!(&hsv[..3], &[0.0, 1.0, 1.0]);
//!
//! let hsl = convert(ColorSpace::Hsv, ColorSpace::Hsl, &hsv);
//! assert_eq!(&hsl[..3], &[0.0, 1.0, 0.5]);
//! ```

use crate::colorspace::{ColorSpace, HUE_PERIOD};
use prism_math::{Mat3, acos_deg, cos_deg, wrap};

/// Fixed-size channel storage shared by every space.
pub type Channels = [f64; ColorSpace::MAX_CHANNELS];

// ============================================================================
// Matrices
// ============================================================================

/// RGB to NTSC YIQ (BT.601 luma weights).
pub const RGB_TO_YIQ: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [0.596, -0.274, -0.322],
    [0.211, -0.523, 0.312],
];

/// NTSC YIQ to RGB.
pub const YIQ_TO_RGB: [[f64; 3]; 3] = [
    [1.0, 0.956, 0.621],
    [1.0, -0.272, -0.647],
    [1.0, -1.106, 1.703],
];

/// RGB to YUV, before the 0-255 scaling.
pub const RGB_TO_YUV: [[f64; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [-0.14713, -0.28886, 0.436],
    [0.615, -0.51499, -0.10001],
];

/// YUV to RGB, applied after dividing by 255.
pub const YUV_TO_RGB: [[f64; 3]; 3] = [
    [1.0, 0.0, 1.13983],
    [1.0, -0.39465, -0.58060],
    [1.0, 2.03211, 0.0],
];

/// RGB to LMS cone response.
pub const RGB_TO_LMS: [[f64; 3]; 3] = [
    [17.8824, 43.5161, 4.1193],
    [3.4557, 27.1554, 3.8671],
    [0.02996, 0.18431, 1.4670],
];

/// LMS cone response to RGB: the inverse of [`RGB_TO_LMS`] to full
/// precision.
///
/// Agrees with the published four-digit table to within 1e-3. The rounded
/// table maps LMS white back to 254 at 8 bits.
pub const LMS_TO_RGB: [[f64; 3]; 3] = [
    [0.0809449417509752, -0.13050525371267563, 0.11672826726482328],
    [-0.010248718905580571, 0.05401967020195728, -0.11362093991154122],
    [-0.00036548675758122837, -0.004121627821193583, 0.6935543943748071],
];

/// Scale of the YUV channels.
pub const YUV_SCALE: f64 = 255.0;

/// Rec.601 luma weights used by HCY.
pub const HCY_LUMA: [f64; 3] = [0.30, 0.59, 0.11];

// ============================================================================
// Graph
// ============================================================================

/// Converts `channels` from `from` to `to`, routing through RGB.
///
/// Converting into the source space returns the input unchanged.
pub fn convert(from: ColorSpace, to: ColorSpace, channels: &Channels) -> Channels {
    if from == to {
        return *channels;
    }
    from_rgb(to, to_rgb(from, channels))
}

/// Converts a channel vector in `space` to RGB.
pub fn to_rgb(space: ColorSpace, c: &Channels) -> [f64; 3] {
    match space {
        ColorSpace::Rgb => [c[0], c[1], c[2]],
        ColorSpace::Hsv => hsv_to_rgb(c[0], c[1], c[2]),
        ColorSpace::Hsl => hsl_to_rgb(c[0], c[1], c[2]),
        ColorSpace::Hsi => hsi_to_rgb(c[0], c[1], c[2]),
        ColorSpace::Hcy => hcy_to_rgb(c[0], c[1], c[2]),
        ColorSpace::Cmyk => cmyk_to_rgb(c[0], c[1], c[2], c[3]),
        ColorSpace::Yiq => Mat3::from_rows(YIQ_TO_RGB).transform([c[0], c[1], c[2]]),
        ColorSpace::Yuv => Mat3::from_rows(YUV_TO_RGB).transform([
            c[0] / YUV_SCALE,
            c[1] / YUV_SCALE,
            c[2] / YUV_SCALE,
        ]),
        ColorSpace::Lms => Mat3::from_rows(LMS_TO_RGB).transform([c[0], c[1], c[2]]),
        ColorSpace::Grey => [c[0], c[0], c[0]],
    }
}

/// Converts an RGB triple into `space`.
pub fn from_rgb(space: ColorSpace, rgb: [f64; 3]) -> Channels {
    let [r, g, b] = rgb;
    match space {
        ColorSpace::Rgb => [r, g, b, 0.0],
        ColorSpace::Hsv => pad(rgb_to_hsv(r, g, b)),
        ColorSpace::Hsl => pad(rgb_to_hsl(r, g, b)),
        ColorSpace::Hsi => pad(rgb_to_hsi(r, g, b)),
        ColorSpace::Hcy => pad(rgb_to_hcy(r, g, b)),
        ColorSpace::Cmyk => rgb_to_cmyk(r, g, b),
        ColorSpace::Yiq => pad(Mat3::from_rows(RGB_TO_YIQ).transform(rgb)),
        ColorSpace::Yuv => {
            let [y, u, v] = Mat3::from_rows(RGB_TO_YUV).transform(rgb);
            [y * YUV_SCALE, u * YUV_SCALE, v * YUV_SCALE, 0.0]
        }
        ColorSpace::Lms => pad(Mat3::from_rows(RGB_TO_LMS).transform(rgb)),
        ColorSpace::Grey => [max3(r, g, b), 0.0, 0.0, 0.0],
    }
}

#[inline]
fn pad(v: [f64; 3]) -> Channels {
    [v[0], v[1], v[2], 0.0]
}

#[inline]
fn max3(a: f64, b: f64, c: f64) -> f64 {
    a.max(b).max(c)
}

#[inline]
fn min3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).min(c)
}

// ============================================================================
// Hexcone family
// ============================================================================

/// Hue in degrees shared by HSV, HSL and HCY. Zero for achromatic input.
fn hexcone_hue(r: f64, g: f64, b: f64, max: f64, chroma: f64) -> f64 {
    if chroma == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };
    wrap(60.0 * sector, HUE_PERIOD)
}

/// Un-offset RGB for a hue and chroma, before adding the lightness match.
fn hexcone_sector(h: f64, chroma: f64) -> [f64; 3] {
    let h_prime = wrap(h, HUE_PERIOD) / 60.0;
    let x = chroma * (1.0 - ((h_prime % 2.0) - 1.0).abs());

    if h_prime < 1.0 {
        [chroma, x, 0.0]
    } else if h_prime < 2.0 {
        [x, chroma, 0.0]
    } else if h_prime < 3.0 {
        [0.0, chroma, x]
    } else if h_prime < 4.0 {
        [0.0, x, chroma]
    } else if h_prime < 5.0 {
        [x, 0.0, chroma]
    } else {
        [chroma, 0.0, x]
    }
}

#[inline]
fn offset(rgb: [f64; 3], m: f64) -> [f64; 3] {
    [rgb[0] + m, rgb[1] + m, rgb[2] + m]
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = max3(r, g, b);
    let chroma = max - min3(r, g, b);
    let s = if chroma == 0.0 { 0.0 } else { chroma / max };
    [hexcone_hue(r, g, b, max, chroma), s, max]
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let chroma = v * s;
    offset(hexcone_sector(h, chroma), v - chroma)
}

fn rgb_to_hsl(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = max3(r, g, b);
    let min = min3(r, g, b);
    let chroma = max - min;
    let l = (max + min) / 2.0;
    let s = if chroma == 0.0 {
        0.0
    } else {
        chroma / (1.0 - (2.0 * l - 1.0).abs())
    };
    [hexcone_hue(r, g, b, max, chroma), s, l]
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    offset(hexcone_sector(h, chroma), l - chroma / 2.0)
}

#[inline]
fn luma(rgb: [f64; 3]) -> f64 {
    HCY_LUMA[0] * rgb[0] + HCY_LUMA[1] * rgb[1] + HCY_LUMA[2] * rgb[2]
}

fn rgb_to_hcy(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = max3(r, g, b);
    let chroma = max - min3(r, g, b);
    [hexcone_hue(r, g, b, max, chroma), chroma, luma([r, g, b])]
}

fn hcy_to_rgb(h: f64, c: f64, y: f64) -> [f64; 3] {
    let sector = hexcone_sector(h, c);
    offset(sector, y - luma(sector))
}

// ============================================================================
// HSI
// ============================================================================

fn rgb_to_hsi(r: f64, g: f64, b: f64) -> [f64; 3] {
    let i = (r + g + b) / 3.0;
    let s = if i <= 0.0 { 0.0 } else { 1.0 - min3(r, g, b) / i };

    let denom = (r * r + g * g + b * b - r * g - r * b - g * b).max(0.0).sqrt();
    let h = if denom == 0.0 {
        0.0
    } else {
        let h = acos_deg((r - g / 2.0 - b / 2.0) / denom);
        if b > g { HUE_PERIOD - h } else { h }
    };
    [wrap(h, HUE_PERIOD), s, i]
}

fn hsi_to_rgb(h: f64, s: f64, i: f64) -> [f64; 3] {
    let h = wrap(h, HUE_PERIOD);
    let is = i * s;

    if h == 0.0 {
        [i + 2.0 * is, i - is, i - is]
    } else if h < 120.0 {
        let k = cos_deg(h) / cos_deg(60.0 - h);
        [i + is * k, i + is * (1.0 - k), i - is]
    } else if h == 120.0 {
        [i - is, i + 2.0 * is, i - is]
    } else if h < 240.0 {
        let k = cos_deg(h - 120.0) / cos_deg(180.0 - h);
        [i - is, i + is * k, i + is * (1.0 - k)]
    } else if h == 240.0 {
        [i - is, i - is, i + 2.0 * is]
    } else {
        let k = cos_deg(h - 240.0) / cos_deg(300.0 - h);
        [i + is * (1.0 - k), i - is, i + is * k]
    }
}

// ============================================================================
// CMYK
// ============================================================================

fn rgb_to_cmyk(r: f64, g: f64, b: f64) -> Channels {
    let k = 1.0 - max3(r, g, b);
    if k >= 1.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let d = 1.0 - k;
    [(1.0 - r - k) / d, (1.0 - g - k) / d, (1.0 - b - k) / d, k]
}

fn cmyk_to_rgb(c: f64, m: f64, y: f64, k: f64) -> [f64; 3] {
    let d = 1.0 - k;
    [(1.0 - c) * d, (1.0 - m) * d, (1.0 - y) * d]
}
