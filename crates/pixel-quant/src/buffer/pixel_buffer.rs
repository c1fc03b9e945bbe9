//! [`PixelBuffer`]: width x height RGBA bytes in row-major order.

use crate::api::PipelineError;
use crate::color::Rgb;

/// Bytes per RGBA pixel.
const CHANNELS: usize = 4;

/// An owned RGBA raster.
///
/// Pixels are stored row-major as `[R, G, B, A]` quads, so `pixels().len()`
/// is always `width * height * 4`. An alpha of 0 marks a fully transparent
/// pixel; such pixels are skipped by every color statistic in the crate.
///
/// Each pipeline stage takes a `&PixelBuffer` and returns a fresh one, so
/// buffers are never aliased between stages.
///
/// # Example
///
/// ```
/// use pixel_quant::{PixelBuffer, Rgb};
///
/// let mut buffer = PixelBuffer::filled(2, 2, Rgb::new(10, 20, 30)).unwrap();
/// buffer.set_rgba(1, 1, [0, 0, 0, 0]);
///
/// assert_eq!(buffer.rgb(0, 0), Rgb::new(10, 20, 30));
/// assert!(buffer.is_transparent(1, 1));
/// assert_eq!(buffer.opaque_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; width * height * CHANNELS],
        })
    }

    /// Create an opaque buffer where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        let pixels = [color.r, color.g, color.b, 255].repeat(width * height);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap existing RGBA bytes.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidDimensions`] if either dimension is zero
    /// - [`PipelineError::UnexpectedBufferShape`] if `pixels.len()` is not
    ///   `width * height * 4`
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        if pixels.len() != width * height * CHANNELS {
            return Err(PipelineError::UnexpectedBufferShape {
                len: pixels.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Accept either packed RGB or RGBA bytes for a `width x height` image.
    ///
    /// RGB input gets an opaque alpha channel. Any other length is a
    /// malformed quantizer result and is rejected; the caller must abort
    /// the run rather than display a partial image.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnexpectedBufferShape`] when the length matches
    /// neither `width * height * 3` nor `width * height * 4`.
    pub fn from_raw(width: usize, height: usize, data: &[u8]) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        let count = width * height;

        if data.len() == count * CHANNELS {
            return Self::from_rgba(width, height, data.to_vec());
        }

        if data.len() == count * 3 {
            let mut pixels = Vec::with_capacity(count * CHANNELS);
            for rgb in data.chunks_exact(3) {
                pixels.extend_from_slice(rgb);
                pixels.push(255);
            }
            return Self::from_rgba(width, height, pixels);
        }

        tracing::error!(
            len = data.len(),
            width,
            height,
            "quantized buffer has an unexpected length"
        );
        Err(PipelineError::UnexpectedBufferShape {
            len: data.len(),
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; zero-sized buffers cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its RGBA bytes.
    #[inline]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        (y * self.width + x) * CHANNELS
    }

    /// RGBA quad at `(x, y)`.
    #[inline]
    pub fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Color at `(x, y)`, ignoring alpha.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> Rgb {
        let i = self.offset(x, y);
        Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    /// Alpha at `(x, y)`.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.pixels[self.offset(x, y) + 3]
    }

    /// Whether the pixel at `(x, y)` is fully transparent.
    #[inline]
    pub fn is_transparent(&self, x: usize, y: usize) -> bool {
        self.alpha(x, y) == 0
    }

    /// Overwrite the RGBA quad at `(x, y)`.
    #[inline]
    pub fn set_rgba(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Overwrite the color at `(x, y)` with an explicit alpha.
    #[inline]
    pub fn set_rgb(&mut self, x: usize, y: usize, color: Rgb, alpha: u8) {
        self.set_rgba(x, y, [color.r, color.g, color.b, alpha]);
    }

    /// Iterate over the colors of all non-transparent pixels in row-major order.
    pub fn opaque_colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .filter(|px| px[3] != 0)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    /// Number of non-transparent pixels.
    pub fn opaque_count(&self) -> usize {
        self.pixels
            .chunks_exact(CHANNELS)
            .filter(|px| px[3] != 0)
            .count()
    }

    /// Whether every pixel has alpha 255.
    pub fn is_fully_opaque(&self) -> bool {
        self.pixels.chunks_exact(CHANNELS).all(|px| px[3] == 255)
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), PipelineError> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions { width, height });
    }
    Ok(())
}
