//! [`apply_palette`]: forced colors, biased nearest match and diffusion.

use super::{ErrorBuffer, RemapOptions};
use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::palette::Palette;

/// Map `buffer` onto `palette`.
///
/// Returns a new buffer of the same size. Alpha is copied from the input
/// and fully transparent pixels keep their color; they neither absorb nor
/// emit diffusion error.
///
/// For each opaque pixel, in raster order:
///
/// 1. If the source color lies within `forced_distance` of a forced color,
///    the pixel becomes that forced color exactly and emits no error.
/// 2. Otherwise the accumulated error is added and the result, clamped to
///    0..=255, is matched against the palette. With `prefer_vibrant`, a
///    vibrant source pixel sees vibrant entries at `vibrant_bias` times
///    their real distance.
/// 3. If a kernel is selected, `error * dith_delta` is spread over the
///    kernel's neighbors in proportion to their weights.
///
/// # Example
///
/// ```
/// use pixel_quant::{apply_palette, Palette, PixelBuffer, RemapOptions, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// let buffer = PixelBuffer::filled(2, 2, Rgb::new(200, 200, 200)).unwrap();
///
/// let out = apply_palette(&buffer, &palette, &RemapOptions::default());
/// assert_eq!(out.rgb(0, 0), Rgb::WHITE);
/// ```
pub fn apply_palette(buffer: &PixelBuffer, palette: &Palette, options: &RemapOptions) -> PixelBuffer {
    let width = buffer.width();
    let height = buffer.height();
    let mut output = buffer.clone();

    let kernel = options
        .kernel
        .table()
        .filter(|_| options.dith_delta > 0.0);
    let scale = kernel.map_or(0.0, |k| options.dith_delta / k.weight_sum() as f32);
    let mut errors = ErrorBuffer::new(width, kernel.map_or(1, |k| k.max_dy + 1));

    let vibrant: Vec<bool> = palette
        .colors()
        .iter()
        .map(|&c| options.prefer_vibrant && options.thresholds.is_salient(c))
        .collect();

    let mut forced_hits = 0usize;
    for y in 0..height {
        for x in 0..width {
            if buffer.is_transparent(x, y) {
                continue;
            }
            let source = buffer.rgb(x, y);
            let alpha = buffer.alpha(x, y);

            if let Some(forced) = forced_match(source, options) {
                output.set_rgb(x, y, forced, alpha);
                forced_hits += 1;
                continue;
            }

            let acc = errors.get_accumulated(x);
            let base = source.to_f32();
            let wanted = [
                (base[0] + acc[0]).clamp(0.0, 255.0),
                (base[1] + acc[1]).clamp(0.0, 255.0),
                (base[2] + acc[2]).clamp(0.0, 255.0),
            ];
            let target = Rgb::from_f32(wanted[0], wanted[1], wanted[2]);

            let biased = options.prefer_vibrant && options.thresholds.is_salient(source);
            let chosen = palette.get(nearest_entry(palette, &vibrant, target, biased, options));
            output.set_rgb(x, y, chosen, alpha);

            let Some(kernel) = kernel else {
                continue;
            };
            let actual = chosen.to_f32();
            let error = [
                wanted[0] - actual[0],
                wanted[1] - actual[1],
                wanted[2] - actual[2],
            ];
            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                if nx < 0 || nx >= width as i64 {
                    continue;
                }
                let share = weight as f32 * scale;
                errors.add_error(
                    nx as usize,
                    dy as usize,
                    [error[0] * share, error[1] * share, error[2] * share],
                );
            }
        }
        errors.advance_row();
    }

    tracing::debug!(
        width,
        height,
        palette = palette.len(),
        kernel = %options.kernel,
        forced_hits,
        "palette applied"
    );
    output
}

/// Closest forced color within `forced_distance` of `source`, first on ties.
fn forced_match(source: Rgb, options: &RemapOptions) -> Option<Rgb> {
    let mut best: Option<(Rgb, f32)> = None;
    for &forced in &options.forced_colors {
        let dist = source.distance(forced);
        if dist <= options.forced_distance && best.map_or(true, |(_, d)| dist < d) {
            best = Some((forced, dist));
        }
    }
    best.map(|(color, _)| color)
}

/// Index of the palette entry with the smallest (possibly biased) distance.
fn nearest_entry(
    palette: &Palette,
    vibrant: &[bool],
    color: Rgb,
    biased: bool,
    options: &RemapOptions,
) -> usize {
    if !biased {
        return palette.nearest(color);
    }
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, (&entry, &is_vibrant)) in palette.colors().iter().zip(vibrant).enumerate() {
        let mut dist = color.distance(entry);
        if is_vibrant {
            dist *= options.vibrant_bias;
        }
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
