//! Median-cut quantization over a frequency-capped sample set.

use super::histogram::Histogram;
use crate::color::Rgb;

/// Expand the histogram into samples proportional to each color's share.
///
/// The most frequent color gets `cap` copies and every other color
/// `round(count * cap / max_count)`, at least one. The sample set stays
/// bounded by `distinct * cap` regardless of image size.
pub(crate) fn sample(histogram: &Histogram, cap: usize) -> Vec<Rgb> {
    let max_count = histogram
        .entries()
        .iter()
        .map(|&(_, count)| count)
        .max()
        .unwrap_or(0);
    if max_count == 0 || cap == 0 {
        return Vec::new();
    }

    let mut samples = Vec::new();
    for &(color, count) in histogram.entries() {
        let share = count as f64 * cap as f64 / max_count as f64;
        let reps = (share.round() as usize).clamp(1, cap);
        samples.extend(std::iter::repeat(color).take(reps));
    }
    samples
}

/// A box of samples. Splitting moves the upper half into a new box.
#[derive(Debug, Clone, Default)]
struct ColorBox {
    samples: Vec<Rgb>,
}

impl ColorBox {
    /// Per-channel (min, max) as `[r, g, b]`.
    fn extents(&self) -> [(u8, u8); 3] {
        let mut ext = [(u8::MAX, u8::MIN); 3];
        for color in &self.samples {
            for (e, v) in ext.iter_mut().zip(color.to_bytes()) {
                e.0 = e.0.min(v);
                e.1 = e.1.max(v);
            }
        }
        ext
    }

    /// Widest channel and its range.
    fn widest(&self) -> (usize, u8) {
        let ext = self.extents();
        let mut channel = 0;
        let mut range = 0u8;
        for (c, &(lo, hi)) in ext.iter().enumerate() {
            let r = hi.saturating_sub(lo);
            if r > range {
                channel = c;
                range = r;
            }
        }
        (channel, range)
    }

    fn is_splittable(&self) -> bool {
        self.samples.len() > 1 && self.widest().1 > 0
    }

    /// Sort along the widest channel and split at the median index.
    ///
    /// `self` keeps the lower half. Returns `None`, leaving the box whole,
    /// if either half would be empty.
    fn split(&mut self) -> Option<ColorBox> {
        let (channel, _) = self.widest();
        self.samples.sort_by_key(|c| c.to_bytes()[channel]);
        let mid = self.samples.len() / 2;
        if mid == 0 || mid == self.samples.len() {
            return None;
        }
        let upper = self.samples.split_off(mid);
        Some(ColorBox { samples: upper })
    }

    /// Rounded per-channel mean.
    fn mean(&self) -> Rgb {
        let n = self.samples.len().max(1) as u64;
        let mut sum = [0u64; 3];
        for color in &self.samples {
            for (s, v) in sum.iter_mut().zip(color.to_bytes()) {
                *s += v as u64;
            }
        }
        let avg = |s: u64| ((s + n / 2) / n) as u8;
        Rgb::new(avg(sum[0]), avg(sum[1]), avg(sum[2]))
    }
}

/// Quantize `samples` into at most `target` colors.
///
/// Colors come out in box order: the first box keeps its slot when split
/// and the upper half is appended. The result may hold fewer than `target`
/// colors when boxes run out or two box means coincide.
pub(crate) fn median_cut(samples: Vec<Rgb>, target: usize) -> Vec<Rgb> {
    if samples.is_empty() || target == 0 {
        return Vec::new();
    }

    let mut boxes = vec![ColorBox { samples }];
    while boxes.len() < target {
        let mut chosen: Option<(usize, u8)> = None;
        for (i, b) in boxes.iter().enumerate() {
            if !b.is_splittable() {
                continue;
            }
            let range = b.widest().1;
            if chosen.map_or(true, |(_, best)| range > best) {
                chosen = Some((i, range));
            }
        }
        let Some((idx, _)) = chosen else {
            break;
        };
        match boxes[idx].split() {
            Some(upper) => boxes.push(upper),
            None => break,
        }
    }

    tracing::debug!(boxes = boxes.len(), target, "median cut finished");

    let mut colors: Vec<Rgb> = Vec::with_capacity(boxes.len());
    for b in &boxes {
        let mean = b.mean();
        if !colors.contains(&mean) {
            colors.push(mean);
        }
    }
    colors
}
