//! Tuning knobs for [`build_palette`](super::build_palette).

use crate::color::{Rgb, SalienceThresholds};

/// Options for palette construction.
///
/// Defaults match the reference tuning: 40 samples per distinct color,
/// 5% rarity cut-off, 24-unit "already represented" radius and a 1.25x
/// saturation boost.
///
/// # Example
///
/// ```
/// use pixel_quant::{PaletteOptions, Rgb};
///
/// let options = PaletteOptions::new()
///     .prefer_vibrant(true)
///     .preserve_salient_count(2)
///     .forced_colors(vec![Rgb::new(200, 10, 10)]);
/// assert!(options.runs_preservation());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteOptions {
    pub(crate) thresholds: SalienceThresholds,
    pub(crate) prefer_vibrant: bool,
    pub(crate) preserve_salient_count: usize,
    pub(crate) forced_colors: Vec<Rgb>,
    pub(crate) sample_cap: usize,
    pub(crate) rarity: f32,
    pub(crate) represented_distance: f32,
    pub(crate) saturation_boost: f32,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            thresholds: SalienceThresholds::default(),
            prefer_vibrant: false,
            preserve_salient_count: 4,
            forced_colors: Vec::new(),
            sample_cap: 40,
            rarity: 0.05,
            represented_distance: 24.0,
            saturation_boost: 1.25,
        }
    }
}

impl PaletteOptions {
    /// Create options with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Thresholds that classify a color as salient.
    #[inline]
    pub fn thresholds(mut self, thresholds: SalienceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Preserve rare salient colors and boost saturation of the result.
    #[inline]
    pub fn prefer_vibrant(mut self, enabled: bool) -> Self {
        self.prefer_vibrant = enabled;
        self
    }

    /// How many rare salient colors get a protected slot when
    /// `prefer_vibrant` is set.
    #[inline]
    pub fn preserve_salient_count(mut self, count: usize) -> Self {
        self.preserve_salient_count = count;
        self
    }

    /// Colors that always get a protected palette slot.
    #[inline]
    pub fn forced_colors(mut self, colors: Vec<Rgb>) -> Self {
        self.forced_colors = colors;
        self
    }

    /// Maximum median-cut samples contributed by one distinct color.
    /// Clamped to at least 1.
    #[inline]
    pub fn sample_cap(mut self, cap: usize) -> Self {
        self.sample_cap = cap.max(1);
        self
    }

    /// Share of opaque pixels (0.0..=1.0) at or below which a color is rare.
    #[inline]
    pub fn rarity(mut self, share: f32) -> Self {
        self.rarity = share.clamp(0.0, 1.0);
        self
    }

    /// RGB distance within which a color counts as already represented.
    #[inline]
    pub fn represented_distance(mut self, distance: f32) -> Self {
        self.represented_distance = distance.max(0.0);
        self
    }

    /// Saturation multiplier applied when `prefer_vibrant` is set.
    #[inline]
    pub fn saturation_boost(mut self, factor: f32) -> Self {
        self.saturation_boost = factor.max(0.0);
        self
    }

    /// Whether the preservation pass has anything to do.
    pub fn runs_preservation(&self) -> bool {
        self.prefer_vibrant || !self.forced_colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PaletteOptions::default();
        assert_eq!(options.sample_cap, 40);
        assert_eq!(options.rarity, 0.05);
        assert_eq!(options.represented_distance, 24.0);
        assert_eq!(options.saturation_boost, 1.25);
        assert!(!options.runs_preservation());
    }

    #[test]
    fn test_setters_clamp() {
        let options = PaletteOptions::new()
            .sample_cap(0)
            .rarity(2.0)
            .represented_distance(-1.0);
        assert_eq!(options.sample_cap, 1);
        assert_eq!(options.rarity, 1.0);
        assert_eq!(options.represented_distance, 0.0);
    }

    #[test]
    fn test_forced_colors_enable_preservation() {
        let options = PaletteOptions::new().forced_colors(vec![Rgb::BLACK]);
        assert!(options.runs_preservation());
    }
}
