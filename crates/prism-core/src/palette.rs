//! Fixed palettes.

use crate::Color;

/// Kenneth Kelly's 20 colors of maximum contrast, as `0xRRGGBB`.
///
/// Ordered so that any prefix is a usable high-contrast set.
pub const KELLY_MAXIMUM_CONTRAST: [u32; 20] = [
    0xFFB300, // vivid yellow
    0x803E75, // strong purple
    0xFF6800, // vivid orange
    0xA6BDD7, // very light blue
    0xC10020, // vivid red
    0xCEA262, // grayish yellow
    0x817066, // medium gray
    0x007D34, // vivid green
    0xF6768E, // strong purplish pink
    0x00538A, // strong blue
    0xFF7A5C, // strong yellowish pink
    0x53377A, // strong violet
    0xFF8E00, // vivid orange yellow
    0xB32851, // strong purplish red
    0xF4C800, // vivid greenish yellow
    0x7F180D, // strong reddish brown
    0x93AA00, // vivid yellowish green
    0x593315, // deep yellowish brown
    0xF13A13, // vivid reddish orange
    0x232C16, // dark olive green
];

/// [`KELLY_MAXIMUM_CONTRAST`] as RGB colors.
pub fn kelly_colors() -> Vec<Color> {
    KELLY_MAXIMUM_CONTRAST
        .iter()
        .map(|&rgb| Color::from_rgb24(rgb))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_kelly_distinct() {
        let colors = kelly_colors();
        assert_eq!(colors.len(), 20);
        let unique: HashSet<_> = colors.iter().collect();
        assert_eq!(unique.len(), 20);
        assert_eq!(colors[0].to_rgb24(), 0xFFB300);
    }
}
