//! Thresholds deciding when a color counts as salient.

use super::Rgb;

/// Luminance and saturation cut-offs for salient ("vibrant") colors.
///
/// A color is salient when its luminance exceeds `luminance` **or** its
/// saturation exceeds `saturation`. Both comparisons are strict.
///
/// # Example
///
/// ```
/// use pixel_quant::{Rgb, SalienceThresholds};
///
/// let thresholds = SalienceThresholds::new(200.0, 0.6);
/// assert!(thresholds.is_salient(Rgb::new(255, 255, 240)));
/// assert!(thresholds.is_salient(Rgb::new(200, 10, 10)));
/// assert!(!thresholds.is_salient(Rgb::new(90, 90, 90)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalienceThresholds {
    /// Luminance cut-off on the 0..=255 scale.
    pub luminance: f32,
    /// Saturation cut-off in 0.0..=1.0.
    pub saturation: f32,
}

impl Default for SalienceThresholds {
    fn default() -> Self {
        Self {
            luminance: 200.0,
            saturation: 0.6,
        }
    }
}

impl SalienceThresholds {
    /// Create thresholds, clamping each to its valid range.
    pub fn new(luminance: f32, saturation: f32) -> Self {
        Self {
            luminance: luminance.clamp(0.0, 255.0),
            saturation: saturation.clamp(0.0, 1.0),
        }
    }

    /// Whether `color` is bright or saturated enough to be salient.
    #[inline]
    pub fn is_salient(&self, color: Rgb) -> bool {
        color.luminance() > self.luminance || color.saturation() > self.saturation
    }
}
