//! Color space identities.
//!
//! A [`ColorSpace`] is a closed set of coordinate systems. Each space has a
//! fixed channel arity and a label for every channel; the conversion graph
//! in [`crate::convert`] dispatches on it with `match`, so adding a space is
//! checked for exhaustiveness at compile time.
//!
//! # Supported Color Spaces
//!
//! ## Hub
//! - [`ColorSpace::Rgb`] - `r, g, b`, nominally in [0, 1]
//!
//! ## Hue-based (first channel is a hue in degrees, wrapped into [0, 360))
//! - [`ColorSpace::Hsv`] - `h, s, v`
//! - [`ColorSpace::Hsl`] - `h, s, l`
//! - [`ColorSpace::Hsi`] - `h, s, i`
//! - [`ColorSpace::Hcy`] - `h, c, y` (hue, chroma, Rec.601 luma)
//!
//! ## Other
//! - [`ColorSpace::Cmyk`] - `c, m, y, k`
//! - [`ColorSpace::Yiq`] - `y, i, q` (NTSC)
//! - [`ColorSpace::Yuv`] - `y, u, v` (BT.601, 0-255 scale)
//! - [`ColorSpace::Lms`] - `l, m, s` (cone response)
//! - [`ColorSpace::Grey`] - `v`
//!
//! # Usage
//!
//! ```
//! use prism_core::ColorSpace;
//!
//! let space: ColorSpace = "hsl".parse().unwrap();
//! assert_eq!(space.arity(), 3);
//! assert_eq!(space.channel_index('l'), Some(2));
//! assert!(space.is_hue());
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// Period of the hue channel, in degrees.
pub const HUE_PERIOD: f64 = 360.0;

/// Identity of a supported color space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpace {
    /// Red, green, blue. The hub of the conversion graph.
    #[default]
    Rgb,
    /// Hue, saturation, value (hexcone).
    Hsv,
    /// Hue, saturation, lightness (bi-hexcone).
    Hsl,
    /// Hue, saturation, intensity.
    Hsi,
    /// Hue, chroma, luma.
    Hcy,
    /// Cyan, magenta, yellow, key.
    Cmyk,
    /// NTSC luma and chrominance.
    Yiq,
    /// BT.601 luma and chrominance, scaled to 0-255.
    Yuv,
    /// Long, medium, short cone response.
    Lms,
    /// Single grey value.
    Grey,
}

impl ColorSpace {
    /// All supported spaces, hub first.
    pub const ALL: [ColorSpace; 10] = [
        ColorSpace::Rgb,
        ColorSpace::Hsv,
        ColorSpace::Hsl,
        ColorSpace::Hsi,
        ColorSpace::Hcy,
        ColorSpace::Cmyk,
        ColorSpace::Yiq,
        ColorSpace::Yuv,
        ColorSpace::Lms,
        ColorSpace::Grey,
    ];

    /// Largest arity of any space.
    pub const MAX_CHANNELS: usize = 4;

    /// Upper-case display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Hsv => "HSV",
            Self::Hsl => "HSL",
            Self::Hsi => "HSI",
            Self::Hcy => "HCY",
            Self::Cmyk => "CMYK",
            Self::Yiq => "YIQ",
            Self::Yuv => "YUV",
            Self::Lms => "LMS",
            Self::Grey => "GREY",
        }
    }

    /// Channel labels in index order, one lower-case character per channel.
    pub const fn labels(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hsv => "hsv",
            Self::Hsl => "hsl",
            Self::Hsi => "hsi",
            Self::Hcy => "hcy",
            Self::Cmyk => "cmyk",
            Self::Yiq => "yiq",
            Self::Yuv => "yuv",
            Self::Lms => "lms",
            Self::Grey => "v",
        }
    }

    /// Number of channels.
    #[inline]
    pub const fn arity(self) -> usize {
        self.labels().len()
    }

    /// Whether channel 0 is a hue that gets wrapped on construction.
    #[inline]
    pub const fn is_hue(self) -> bool {
        matches!(self, Self::Hsv | Self::Hsl | Self::Hsi | Self::Hcy)
    }

    /// Whether channel `index` nominally lies in [0, 1].
    ///
    /// False for hue (degrees), the signed YIQ chroma pair, the 0-255 YUV
    /// channels and the unbounded LMS responses.
    pub const fn is_unit_channel(self, index: usize) -> bool {
        match self {
            Self::Rgb | Self::Cmyk | Self::Grey => index < self.arity(),
            Self::Hsv | Self::Hsl | Self::Hsi | Self::Hcy => index == 1 || index == 2,
            Self::Yiq => index == 0,
            Self::Yuv | Self::Lms => false,
        }
    }

    /// Index of the channel labelled `label` (case-insensitive).
    pub fn channel_index(self, label: char) -> Option<usize> {
        let label = label.to_ascii_lowercase();
        self.labels().chars().position(|c| c == label)
    }

    /// Like [`channel_index`](Self::channel_index), but fails with
    /// [`Error::UnknownChannel`].
    pub fn require_channel(self, label: char) -> crate::Result<usize> {
        self.channel_index(label).ok_or(Error::UnknownChannel {
            space: self.name(),
            label: label.to_ascii_lowercase(),
        })
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "hsv" | "hsb" => Ok(Self::Hsv),
            "hsl" => Ok(Self::Hsl),
            "hsi" => Ok(Self::Hsi),
            "hcy" => Ok(Self::Hcy),
            "cmyk" => Ok(Self::Cmyk),
            "yiq" => Ok(Self::Yiq),
            "yuv" => Ok(Self::Yuv),
            "lms" => Ok(Self::Lms),
            "grey" | "gray" | "greyscale" | "grayscale" => Ok(Self::Grey),
            _ => Err(Error::UnsupportedSpace { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(ColorSpace::Rgb.arity(), 3);
        assert_eq!(ColorSpace::Cmyk.arity(), 4);
        assert_eq!(ColorSpace::Grey.arity(), 1);
        for space in ColorSpace::ALL {
            assert!(space.arity() <= ColorSpace::MAX_CHANNELS);
        }
    }

    #[test]
    fn test_channel_lookup() {
        assert_eq!(ColorSpace::Rgb.channel_index('G'), Some(1));
        assert_eq!(ColorSpace::Cmyk.channel_index('k'), Some(3));
        assert_eq!(ColorSpace::Yuv.channel_index('r'), None);

        let err = ColorSpace::Hsv.require_channel('L').unwrap_err();
        assert_eq!(
            err,
            Error::UnknownChannel {
                space: "HSV",
                label: 'l'
            }
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("HSV".parse::<ColorSpace>().unwrap(), ColorSpace::Hsv);
        assert_eq!(" cmyk ".parse::<ColorSpace>().unwrap(), ColorSpace::Cmyk);
        assert!(matches!(
            "xyz".parse::<ColorSpace>(),
            Err(Error::UnsupportedSpace { .. })
        ));
    }

    #[test]
    fn test_names_roundtrip() {
        for space in ColorSpace::ALL {
            assert_eq!(space.name().parse::<ColorSpace>().unwrap(), space);
        }
    }

    #[test]
    fn test_hue_spaces() {
        let hue: Vec<_> = ColorSpace::ALL.iter().filter(|s| s.is_hue()).collect();
        assert_eq!(hue.len(), 4);
        for space in hue {
            assert_eq!(space.labels().chars().next(), Some('h'));
        }
    }

    #[test]
    fn test_unit_channels() {
        for space in ColorSpace::ALL {
            if space.is_hue() {
                assert!(!space.is_unit_channel(0), "{space}");
            }
            assert!(!space.is_unit_channel(space.arity()), "{space}");
        }
        assert!(ColorSpace::Cmyk.is_unit_channel(3));
        assert!(ColorSpace::Hsl.is_unit_channel(2));
        assert!(ColorSpace::Yiq.is_unit_channel(0));
        assert!(!ColorSpace::Yiq.is_unit_channel(1));
        assert!(!ColorSpace::Yuv.is_unit_channel(0));
        assert!(!ColorSpace::Lms.is_unit_channel(0));
    }
}
