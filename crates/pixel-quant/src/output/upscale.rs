//! Nearest-neighbor resampling.

use crate::api::PipelineError;
use crate::buffer::PixelBuffer;

/// Resample `buffer` to `target_width` x `target_height` without
/// interpolation.
///
/// Destination pixel `(x, y)` copies source pixel
/// `(floor(x * w / target_width), floor(y * h / target_height))`,
/// alpha included. Works in both directions, so it also shrinks.
///
/// # Errors
///
/// [`PipelineError::InvalidDimensions`] if a target dimension is zero.
///
/// # Example
///
/// ```
/// use pixel_quant::{upscale, PixelBuffer, Rgb};
///
/// let mut small = PixelBuffer::filled(2, 1, Rgb::BLACK).unwrap();
/// small.set_rgb(1, 0, Rgb::WHITE, 255);
///
/// let big = upscale(&small, 4, 2).unwrap();
/// assert_eq!(big.rgb(1, 1), Rgb::BLACK);
/// assert_eq!(big.rgb(2, 0), Rgb::WHITE);
/// ```
pub fn upscale(
    buffer: &PixelBuffer,
    target_width: usize,
    target_height: usize,
) -> Result<PixelBuffer, PipelineError> {
    let mut output = PixelBuffer::new(target_width, target_height)?;
    let (src_w, src_h) = (buffer.width(), buffer.height());

    let columns: Vec<usize> = (0..target_width)
        .map(|x| source_index(x, src_w, target_width))
        .collect();

    for y in 0..target_height {
        let sy = source_index(y, src_h, target_height);
        for (x, &sx) in columns.iter().enumerate() {
            output.set_rgba(x, y, buffer.rgba(sx, sy));
        }
    }

    Ok(output)
}

#[inline]
fn source_index(dst: usize, src_len: usize, dst_len: usize) -> usize {
    let idx = (dst as u64 * src_len as u64 / dst_len as u64) as usize;
    idx.min(src_len - 1)
}
