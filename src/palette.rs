//! Chit color palette.
//!
//! A fixed, ordered set of visually distinct colors. Every new chit gets one
//! color drawn uniformly at random; collisions between chits are allowed.

use image::Rgba;
use rand::seq::SliceRandom;
use rand::Rng;

/// Named chit colors (CSS3 values), in palette order.
const CHIT_COLORS: &[(&str, Rgba<u8>)] = &[
    ("deeppink", Rgba([255, 20, 147, 255])),
    ("red", Rgba([255, 0, 0, 255])),
    ("orange", Rgba([255, 165, 0, 255])),
    ("gold", Rgba([255, 215, 0, 255])),
    ("chocolate", Rgba([210, 105, 30, 255])),
    ("limegreen", Rgba([50, 205, 50, 255])),
    ("forestgreen", Rgba([34, 139, 34, 255])),
    ("dodgerblue", Rgba([30, 144, 255, 255])),
    ("darkorchid", Rgba([153, 50, 204, 255])),
    ("slategray", Rgba([112, 128, 144, 255])),
];

/// Ordered list of colors handed out to new chits.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    entries: &'static [(&'static str, Rgba<u8>)],
}

impl ColorPalette {
    /// The ten built-in chit colors.
    pub const fn chit_colors() -> Self {
        Self { entries: CHIT_COLORS }
    }

    /// Pick a color uniformly at random using the thread-local RNG.
    pub fn pick_random(&self) -> Rgba<u8> {
        self.pick_with(&mut rand::thread_rng())
    }

    /// Pick a color uniformly at random using `rng`.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgba<u8> {
        self.entries
            .choose(rng)
            .map(|(_, color)| *color)
            .unwrap_or(Rgba([0, 0, 0, 255]))
    }

    /// Color names, in palette order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Colors, in palette order.
    pub fn colors(&self) -> impl Iterator<Item = Rgba<u8>> + '_ {
        self.entries.iter().map(|(_, color)| *color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::chit_colors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse_color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chit_colors_order() {
        let names: Vec<_> = ColorPalette::chit_colors().names().collect();
        assert_eq!(
            names,
            vec![
                "deeppink",
                "red",
                "orange",
                "gold",
                "chocolate",
                "limegreen",
                "forestgreen",
                "dodgerblue",
                "darkorchid",
                "slategray"
            ]
        );
    }

    #[test]
    fn test_chit_colors_match_css_names() {
        for (name, color) in CHIT_COLORS {
            assert_eq!(parse_color(name).as_ref(), Ok(color), "color {} differs from CSS", name);
        }
    }

    #[test]
    fn test_pick_is_from_palette() {
        let palette = ColorPalette::default();
        let colors: Vec<_> = palette.colors().collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(colors.contains(&palette.pick_with(&mut rng)));
        }
        assert!(colors.contains(&palette.pick_random()));
    }

    #[test]
    fn test_pick_reaches_every_color() {
        let palette = ColorPalette::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(palette.pick_with(&mut rng).0);
        }
        assert_eq!(seen.len(), palette.len());
    }
}
