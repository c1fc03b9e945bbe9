//! [`build_palette`]: histogram, median cut, preservation and boost.

use super::histogram::Histogram;
use super::median_cut::{median_cut, sample};
use super::options::PaletteOptions;
use super::palette::Palette;
use super::preserve::preserve_colors;
use crate::buffer::PixelBuffer;
use crate::color::{boost_saturation, Rgb};

/// Build a palette of at most `num_colors` colors for `buffer`.
///
/// - `num_colors == 0` yields a single black entry.
/// - A buffer without opaque pixels yields a single white entry.
/// - If the buffer has no more than `num_colors` distinct opaque colors,
///   exactly those colors are returned in first-seen order, untouched.
///
/// Otherwise the colors come from median cut over a frequency-capped
/// sample set, followed by the preservation pass when `prefer_vibrant` is
/// set or forced colors are given, and finally (with `prefer_vibrant`) a
/// saturation boost of every entry that is not a forced color.
///
/// # Example
///
/// ```
/// use pixel_quant::{build_palette, PaletteOptions, PixelBuffer, Rgb};
///
/// let mut buffer = PixelBuffer::filled(4, 4, Rgb::new(20, 20, 20)).unwrap();
/// buffer.set_rgb(0, 0, Rgb::new(240, 240, 240), 255);
///
/// let palette = build_palette(&buffer, 8, &PaletteOptions::default());
/// assert_eq!(palette.len(), 2);
/// ```
pub fn build_palette(buffer: &PixelBuffer, num_colors: usize, options: &PaletteOptions) -> Palette {
    if num_colors == 0 {
        return Palette::single(Rgb::BLACK);
    }

    let histogram = Histogram::from_buffer(buffer);
    if histogram.is_empty() {
        return Palette::single(Rgb::WHITE);
    }
    if histogram.distinct() <= num_colors {
        tracing::debug!(
            distinct = histogram.distinct(),
            "image already fits the palette"
        );
        return Palette::from_unique(histogram.colors().collect());
    }

    let samples = sample(&histogram, options.sample_cap);
    tracing::debug!(
        distinct = histogram.distinct(),
        samples = samples.len(),
        num_colors,
        "building palette"
    );
    let mut colors = median_cut(samples, num_colors);

    if options.runs_preservation() {
        preserve_colors(&mut colors, &histogram, options);
    }

    if options.prefer_vibrant {
        for color in colors.iter_mut() {
            if !options.forced_colors.contains(color) {
                *color = boost_saturation(*color, options.saturation_boost);
            }
        }
    }

    colors.truncate(num_colors);
    let palette = Palette::from_unique(colors);
    tracing::debug!(colors = palette.len(), "palette built");
    palette
}
