//! Remapping options for [`apply_palette`](super::apply_palette).

use super::DitherKernel;
use crate::color::{Rgb, SalienceThresholds};

/// Configuration for mapping pixels onto a palette.
///
/// # Defaults
///
/// - kernel: [`DitherKernel::None`] (nearest-color only)
/// - strength (`dith_delta`): 0.5
/// - forced colors: none, matched within distance 48 when present
/// - vibrant bias: off, factor 0.75 when enabled
///
/// # Example
///
/// ```
/// use pixel_quant::{DitherKernel, RemapOptions, Rgb};
///
/// let options = RemapOptions::new()
///     .kernel(DitherKernel::FloydSteinberg)
///     .dith_delta(0.8)
///     .forced_colors(vec![Rgb::new(200, 10, 10)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RemapOptions {
    /// Error diffusion kernel.
    pub kernel: DitherKernel,

    /// Diffusion strength in 0.0..=1.0. Zero disables diffusion.
    pub dith_delta: f32,

    /// Colors that override the palette for pixels close enough to them.
    pub forced_colors: Vec<Rgb>,

    /// Maximum RGB distance for a forced-color match.
    pub forced_distance: f32,

    /// Favor vibrant palette entries for vibrant source pixels.
    pub prefer_vibrant: bool,

    /// What counts as vibrant.
    pub thresholds: SalienceThresholds,

    /// Distance multiplier for vibrant entries when `prefer_vibrant` applies.
    pub vibrant_bias: f32,
}

impl Default for RemapOptions {
    fn default() -> Self {
        Self {
            kernel: DitherKernel::None,
            dith_delta: 0.5,
            forced_colors: Vec::new(),
            forced_distance: 48.0,
            prefer_vibrant: false,
            thresholds: SalienceThresholds::default(),
            vibrant_bias: 0.75,
        }
    }
}

impl RemapOptions {
    /// Create new remap options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffusion kernel.
    #[inline]
    pub fn kernel(mut self, kernel: DitherKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the diffusion strength, clamped to 0.0..=1.0.
    #[inline]
    pub fn dith_delta(mut self, delta: f32) -> Self {
        self.dith_delta = delta.clamp(0.0, 1.0);
        self
    }

    /// Set the forced colors.
    #[inline]
    pub fn forced_colors(mut self, colors: Vec<Rgb>) -> Self {
        self.forced_colors = colors;
        self
    }

    /// Set the forced-color match radius.
    #[inline]
    pub fn forced_distance(mut self, distance: f32) -> Self {
        self.forced_distance = distance.max(0.0);
        self
    }

    /// Enable or disable the vibrant bias.
    #[inline]
    pub fn prefer_vibrant(mut self, enabled: bool) -> Self {
        self.prefer_vibrant = enabled;
        self
    }

    /// Set the salience thresholds.
    #[inline]
    pub fn thresholds(mut self, thresholds: SalienceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the vibrant distance multiplier, clamped to 0.0..=1.0.
    #[inline]
    pub fn vibrant_bias(mut self, factor: f32) -> Self {
        self.vibrant_bias = factor.clamp(0.0, 1.0);
        self
    }
}
