//! Block color estimators.
//!
//! Each estimator reduces the half-open rectangle `[x0, x1) x [y0, y1)` of
//! a source buffer to one [`Rgb`]. They are pure and never fail: a block
//! with no usable pixels resolves through the fallback chain
//! `salient -> mode -> average -> white`.

use std::collections::HashMap;

use super::PixelationMethod;
use crate::buffer::PixelBuffer;
use crate::color::{Rgb, SalienceThresholds};

/// A half-open rectangle of source pixels, `[x0, x1) x [y0, y1)`.
///
/// Bounds beyond the buffer are clamped when the region is read, so a
/// region may safely reach `x1 == width` or `y1 == height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRegion {
    /// First column (inclusive)
    pub x0: usize,
    /// Last column (exclusive)
    pub x1: usize,
    /// First row (inclusive)
    pub y0: usize,
    /// Last row (exclusive)
    pub y1: usize,
}

impl BlockRegion {
    /// Create a region from its column and row ranges.
    pub fn new(x0: usize, x1: usize, y0: usize, y1: usize) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Iterate over in-bounds `(x, y)` coordinates in row-major order.
    fn coords(&self, source: &PixelBuffer) -> impl Iterator<Item = (usize, usize)> {
        let x0 = self.x0;
        let x1 = self.x1.min(source.width());
        let y0 = self.y0;
        let y1 = self.y1.min(source.height());
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }

    /// Colors of the opaque pixels inside the region, row-major.
    fn opaque_colors<'a>(&self, source: &'a PixelBuffer) -> impl Iterator<Item = Rgb> + 'a {
        self.coords(source)
            .filter(move |&(x, y)| !source.is_transparent(x, y))
            .map(move |(x, y)| source.rgb(x, y))
    }
}

/// Reduce `region` of `source` to a single representative color.
///
/// # Example
///
/// ```
/// use pixel_quant::{estimate, BlockRegion, PixelBuffer, PixelationMethod, Rgb, SalienceThresholds};
///
/// let mut source = PixelBuffer::filled(2, 1, Rgb::new(10, 10, 10)).unwrap();
/// source.set_rgb(1, 0, Rgb::new(20, 20, 20), 255);
///
/// let color = estimate(
///     &source,
///     &BlockRegion::new(0, 2, 0, 1),
///     PixelationMethod::Average,
///     &SalienceThresholds::default(),
/// );
/// assert_eq!(color, Rgb::new(15, 15, 15));
/// ```
pub fn estimate(
    source: &PixelBuffer,
    region: &BlockRegion,
    method: PixelationMethod,
    thresholds: &SalienceThresholds,
) -> Rgb {
    (method.estimator())(source, region, thresholds)
}

/// Sample the physical pixel nearest the region center.
///
/// Transparency is not consulted: this always returns the color bytes of
/// one real pixel, even when that pixel is transparent.
pub(crate) fn nearest(source: &PixelBuffer, region: &BlockRegion, _: &SalienceThresholds) -> Rgb {
    let cx = ((region.x0 + region.x1) / 2).min(source.width() - 1);
    let cy = ((region.y0 + region.y1) / 2).min(source.height() - 1);
    source.rgb(cx, cy)
}

pub(crate) fn average(source: &PixelBuffer, region: &BlockRegion, _: &SalienceThresholds) -> Rgb {
    average_of(source, region).unwrap_or(Rgb::WHITE)
}

pub(crate) fn mode(source: &PixelBuffer, region: &BlockRegion, _: &SalienceThresholds) -> Rgb {
    mode_of(source, region)
        .or_else(|| average_of(source, region))
        .unwrap_or(Rgb::WHITE)
}

pub(crate) fn salient(
    source: &PixelBuffer,
    region: &BlockRegion,
    thresholds: &SalienceThresholds,
) -> Rgb {
    salient_of(source, region, thresholds)
        .or_else(|| mode_of(source, region))
        .or_else(|| average_of(source, region))
        .unwrap_or(Rgb::WHITE)
}

/// Rounded per-channel mean of the opaque pixels, `None` when there are none.
fn average_of(source: &PixelBuffer, region: &BlockRegion) -> Option<Rgb> {
    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for color in region.opaque_colors(source) {
        sum[0] += color.r as u64;
        sum[1] += color.g as u64;
        sum[2] += color.b as u64;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(Rgb::from_f32(
        (sum[0] as f64 / n) as f32,
        (sum[1] as f64 / n) as f32,
        (sum[2] as f64 / n) as f32,
    ))
}

/// Most frequent opaque color; ties go to the color seen first.
fn mode_of(source: &PixelBuffer, region: &BlockRegion) -> Option<Rgb> {
    let mut order: Vec<(Rgb, u32)> = Vec::new();
    let mut slots: HashMap<Rgb, usize> = HashMap::new();

    for color in region.opaque_colors(source) {
        match slots.get(&color) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                slots.insert(color, order.len());
                order.push((color, 1));
            }
        }
    }

    let mut best: Option<(Rgb, u32)> = None;
    for (color, count) in order {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((color, count));
        }
    }
    best.map(|(color, _)| color)
}

/// Brightest salient pixel.
///
/// Luminance is compared first; saturation only decides between pixels of
/// equal luminance. A bright near-white pixel therefore beats a darker
/// fully saturated one, and on a full tie the first pixel seen wins.
fn salient_of(
    source: &PixelBuffer,
    region: &BlockRegion,
    thresholds: &SalienceThresholds,
) -> Option<Rgb> {
    let mut best: Option<(Rgb, f32, f32)> = None;

    for color in region.opaque_colors(source) {
        if !thresholds.is_salient(color) {
            continue;
        }
        let lum = color.luminance();
        let sat = color.saturation();
        let better = match best {
            None => true,
            Some((_, best_lum, best_sat)) => {
                lum > best_lum || (lum == best_lum && sat > best_sat)
            }
        };
        if better {
            best = Some((color, lum, sat));
        }
    }
    best.map(|(color, _, _)| color)
}
