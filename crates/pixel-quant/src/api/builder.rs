//! Pixelator builder: downsample, quantize, remap and upscale in one call.

use crate::buffer::PixelBuffer;
use crate::color::{Rgb, SalienceThresholds};
use crate::dither::{apply_palette, DitherKernel, RemapOptions};
use crate::output::upscale;
use crate::palette::{build_palette, Palette, PaletteOptions};
use crate::pixelate::{downsample, PixelationMethod};

use super::PipelineError;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// The quantized grid at result resolution.
    pub small: PixelBuffer,
    /// `small` upscaled to the display size.
    pub display: PixelBuffer,
    /// The palette used, or `None` when color reduction is off.
    pub palette: Option<Palette>,
}

/// High-level pixel-art pipeline.
///
/// - Configuration methods consume and return `self`
/// - [`run()`](Self::run) takes `&self`, so one configuration can process
///   many images
///
/// Defaults: 32x32 result, 16 colors, `Nearest` sampling, color reduction
/// on, dithering off (kernel `None`, strength 0.5), no vibrant bias, four
/// preserved salient colors, no forced colors.
///
/// # Example
///
/// ```
/// use pixel_quant::{DitherKernel, PixelBuffer, PixelationMethod, Pixelator, Rgb};
///
/// let source = PixelBuffer::filled(64, 48, Rgb::new(40, 120, 200)).unwrap();
///
/// let output = Pixelator::new()
///     .result_size(16, 12)
///     .colors_count(8)
///     .method(PixelationMethod::Average)
///     .dithering(true)
///     .kernel(DitherKernel::FloydSteinberg)
///     .run(&source)
///     .unwrap();
///
/// assert_eq!(output.small.width(), 16);
/// assert_eq!(output.display.width(), 64);
/// assert_eq!(output.display.rgb(10, 10), Rgb::new(40, 120, 200));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pixelator {
    result_size: Option<(usize, usize)>,
    display_size: Option<(usize, usize)>,
    colors_count: usize,
    method: PixelationMethod,
    thresholds: SalienceThresholds,
    reduce_colors: bool,
    dithering: bool,
    kernel: DitherKernel,
    dith_delta: f32,
    prefer_vibrant: bool,
    preserve_salient_count: usize,
    forced_colors: Vec<Rgb>,
}

impl Default for Pixelator {
    fn default() -> Self {
        Self {
            result_size: Some((32, 32)),
            display_size: None,
            colors_count: 16,
            method: PixelationMethod::default(),
            thresholds: SalienceThresholds::default(),
            reduce_colors: true,
            dithering: false,
            kernel: DitherKernel::None,
            dith_delta: 0.5,
            prefer_vibrant: false,
            preserve_salient_count: 4,
            forced_colors: Vec::new(),
        }
    }
}

impl Pixelator {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Downsample to `width` x `height`.
    #[inline]
    pub fn result_size(mut self, width: usize, height: usize) -> Self {
        self.result_size = Some((width, height));
        self
    }

    /// Keep the source dimensions; only quantize.
    #[inline]
    pub fn keep_source_size(mut self) -> Self {
        self.result_size = None;
        self
    }

    /// Upscale the result to `width` x `height` instead of the source size.
    #[inline]
    pub fn display_size(mut self, width: usize, height: usize) -> Self {
        self.display_size = Some((width, height));
        self
    }

    /// Maximum palette size. Zero yields a black palette.
    #[inline]
    pub fn colors_count(mut self, count: usize) -> Self {
        self.colors_count = count;
        self
    }

    /// Block estimator used while downsampling.
    #[inline]
    pub fn method(mut self, method: PixelationMethod) -> Self {
        self.method = method;
        self
    }

    /// Salience thresholds shared by the estimator, palette and remapper.
    #[inline]
    pub fn thresholds(mut self, thresholds: SalienceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Build a palette and remap onto it.
    #[inline]
    pub fn reduce_colors(mut self, enabled: bool) -> Self {
        self.reduce_colors = enabled;
        self
    }

    /// Use the selected kernel for error diffusion.
    #[inline]
    pub fn dithering(mut self, enabled: bool) -> Self {
        self.dithering = enabled;
        self
    }

    /// Diffusion kernel, effective only with [`dithering`](Self::dithering).
    #[inline]
    pub fn kernel(mut self, kernel: DitherKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Diffusion strength, clamped to 0.0..=1.0.
    #[inline]
    pub fn dith_delta(mut self, delta: f32) -> Self {
        self.dith_delta = delta.clamp(0.0, 1.0);
        self
    }

    /// Keep rare vibrant colors, boost saturation and bias remapping.
    #[inline]
    pub fn prefer_vibrant(mut self, enabled: bool) -> Self {
        self.prefer_vibrant = enabled;
        self
    }

    /// Number of rare salient colors to protect with `prefer_vibrant`.
    #[inline]
    pub fn preserve_salient_count(mut self, count: usize) -> Self {
        self.preserve_salient_count = count;
        self
    }

    /// Colors that must survive quantization unchanged.
    #[inline]
    pub fn forced_colors(mut self, colors: Vec<Rgb>) -> Self {
        self.forced_colors = colors;
        self
    }

    /// Palette options derived from this configuration.
    pub fn palette_options(&self) -> PaletteOptions {
        PaletteOptions::new()
            .thresholds(self.thresholds)
            .prefer_vibrant(self.prefer_vibrant)
            .preserve_salient_count(self.preserve_salient_count)
            .forced_colors(self.forced_colors.clone())
    }

    /// Remap options derived from this configuration.
    pub fn remap_options(&self) -> RemapOptions {
        let kernel = if self.dithering {
            self.kernel
        } else {
            DitherKernel::None
        };
        RemapOptions::new()
            .kernel(kernel)
            .dith_delta(self.dith_delta)
            .forced_colors(self.forced_colors.clone())
            .prefer_vibrant(self.prefer_vibrant)
            .thresholds(self.thresholds)
    }

    /// Run the full pipeline on `source`.
    ///
    /// 1. Downsample to the result size
    /// 2. Build a palette and remap (when color reduction is on)
    /// 3. Upscale to the display size (source size by default)
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidDimensions`] if the result or display size
    /// has a zero dimension.
    pub fn run(&self, source: &PixelBuffer) -> Result<PipelineOutput, PipelineError> {
        let (width, height) = self
            .result_size
            .unwrap_or((source.width(), source.height()));
        let small = downsample(source, width, height, self.method, &self.thresholds)?;

        let (small, palette) = if self.reduce_colors {
            let palette = build_palette(&small, self.colors_count, &self.palette_options());
            let mapped = apply_palette(&small, &palette, &self.remap_options());
            (mapped, Some(palette))
        } else {
            (small, None)
        };

        let (display_w, display_h) = self
            .display_size
            .unwrap_or((source.width(), source.height()));
        let display = upscale(&small, display_w, display_h)?;

        tracing::debug!(
            width,
            height,
            colors = palette.as_ref().map_or(0, Palette::len),
            display_w,
            display_h,
            "pipeline finished"
        );

        Ok(PipelineOutput {
            small,
            display,
            palette,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_halves() -> PixelBuffer {
        let mut buffer = PixelBuffer::filled(8, 8, Rgb::new(250, 250, 250)).unwrap();
        for y in 0..8 {
            for x in 0..4 {
                buffer.set_rgb(x, y, Rgb::new(10, 10, 10), 255);
            }
        }
        buffer
    }

    #[test]
    fn test_default_sizes() {
        let output = Pixelator::new().run(&two_halves()).unwrap();
        assert_eq!((output.small.width(), output.small.height()), (32, 32));
        assert_eq!((output.display.width(), output.display.height()), (8, 8));
    }

    #[test]
    fn test_keep_source_size() {
        let output = Pixelator::new()
            .keep_source_size()
            .run(&two_halves())
            .unwrap();
        assert_eq!(output.small, two_halves());
        assert_eq!(output.palette.map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_display_size() {
        let output = Pixelator::new()
            .result_size(2, 2)
            .display_size(20, 10)
            .run(&two_halves())
            .unwrap();
        assert_eq!(output.display.width(), 20);
        assert_eq!(output.display.rgb(0, 0), Rgb::new(10, 10, 10));
        assert_eq!(output.display.rgb(19, 9), Rgb::new(250, 250, 250));
    }

    #[test]
    fn test_reduce_colors_off_has_no_palette() {
        let output = Pixelator::new()
            .result_size(4, 4)
            .reduce_colors(false)
            .run(&two_halves())
            .unwrap();
        assert!(output.palette.is_none());
    }

    #[test]
    fn test_kernel_ignored_without_dithering() {
        let pixelator = Pixelator::new().kernel(DitherKernel::Burkes);
        assert_eq!(pixelator.remap_options().kernel, DitherKernel::None);
        let pixelator = pixelator.dithering(true);
        assert_eq!(pixelator.remap_options().kernel, DitherKernel::Burkes);
    }

    #[test]
    fn test_zero_result_size_is_error() {
        let err = Pixelator::new()
            .result_size(0, 4)
            .run(&two_halves())
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
    }
}
