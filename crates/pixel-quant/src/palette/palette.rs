//! Ordered list of distinct colors with nearest-color lookup.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::Rgb;

/// An ordered set of distinct colors.
///
/// Order is meaningful: palettes built by [`build_palette`](super::build_palette)
/// keep median-cut box order, and [`Palette::nearest`] breaks distance ties
/// in favor of the earlier entry.
///
/// # Example
///
/// ```
/// use pixel_quant::{Palette, Rgb};
///
/// let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
/// assert_eq!(palette.nearest(Rgb::new(200, 200, 200)), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from explicit colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::DuplicateColor`] if a color repeats
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        let mut seen = HashSet::new();
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index });
            }
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from hex strings (`#RRGGBB` or `#RGB`).
    pub fn from_hex(hex: &[&str]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| s.parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// Build from colors that may repeat, keeping the first occurrence of each.
    ///
    /// Callers guarantee `colors` is non-empty.
    pub(crate) fn from_unique(colors: Vec<Rgb>) -> Self {
        let mut seen = HashSet::with_capacity(colors.len());
        let colors: Vec<Rgb> = colors.into_iter().filter(|c| seen.insert(*c)).collect();
        debug_assert!(!colors.is_empty(), "palette must not be empty");
        Self { colors }
    }

    /// A one-entry palette.
    pub(crate) fn single(color: Rgb) -> Self {
        Self {
            colors: vec![color],
        }
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for palettes built by this crate.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// Whether `color` is an entry of this palette.
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Index of the entry closest to `color` by Euclidean RGB distance.
    ///
    /// Ties resolve to the lowest index.
    pub fn nearest(&self, color: Rgb) -> usize {
        nearest_index(&self.colors, color)
    }

    /// Entries as `#RRGGBB` strings.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

/// Index of the closest color in `colors`, first index on ties.
pub(crate) fn nearest_index(colors: &[Rgb], color: Rgb) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, &entry) in colors.iter().enumerate() {
        let dist = color.distance_sq(entry);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ParseColorError;

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Palette::new(&[]).unwrap_err(), PaletteError::EmptyPalette);
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = Palette::new(&[Rgb::BLACK, Rgb::WHITE, Rgb::BLACK]).unwrap_err();
        assert_eq!(err, PaletteError::DuplicateColor { index: 2 });
    }

    #[test]
    fn test_from_hex_parse_error() {
        let err = Palette::from_hex(&["#000", "#12"]).unwrap_err();
        assert_eq!(err, PaletteError::ParseColor(ParseColorError::InvalidLength));
    }

    #[test]
    fn test_from_unique_keeps_first_occurrence() {
        let palette = Palette::from_unique(vec![
            Rgb::new(1, 1, 1),
            Rgb::new(2, 2, 2),
            Rgb::new(1, 1, 1),
        ]);
        assert_eq!(palette.colors(), &[Rgb::new(1, 1, 1), Rgb::new(2, 2, 2)]);
    }

    #[test]
    fn test_nearest_tie_goes_to_first() {
        let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(20, 0, 0)]).unwrap();
        assert_eq!(palette.nearest(Rgb::new(10, 0, 0)), 0);
        assert_eq!(palette.nearest(Rgb::new(11, 0, 0)), 1);
    }

    #[test]
    fn test_to_hex() {
        let palette = Palette::new(&[Rgb::new(255, 0, 16)]).unwrap();
        assert_eq!(palette.to_hex(), vec!["#FF0010".to_string()]);
        assert!(palette.contains(Rgb::new(255, 0, 16)));
    }
}
