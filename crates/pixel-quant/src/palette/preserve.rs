//! Preservation pass: put rare salient and forced colors back into a
//! median-cut palette.
//!
//! Median cut averages small clusters away, so a single bright highlight
//! or a color the user picked would otherwise vanish. Each such color
//! takes over the least important slot, where importance is the number of
//! pixels a slot currently wins minus a penalty for dark, desaturated
//! slots.

use super::histogram::Histogram;
use super::options::PaletteOptions;
use super::palette::nearest_index;
use crate::color::Rgb;

/// Colors that are salient and cover at most `rarity` of the opaque
/// pixels, ordered by `luminance + ln(1 + count)` descending.
pub(crate) fn rare_salient_candidates(
    histogram: &Histogram,
    options: &PaletteOptions,
) -> Vec<(Rgb, u32)> {
    let limit = options.rarity as f64 * histogram.total() as f64;
    let mut candidates: Vec<(Rgb, u32)> = histogram
        .entries()
        .iter()
        .copied()
        .filter(|&(color, count)| {
            count as f64 <= limit && options.thresholds.is_salient(color)
        })
        .collect();
    candidates.sort_by(|a, b| candidate_score(*b).total_cmp(&candidate_score(*a)));
    candidates
}

fn candidate_score((color, count): (Rgb, u32)) -> f64 {
    color.luminance() as f64 + (1.0 + count as f64).ln()
}

/// 1.0 for black, 0.0 for anything fully bright or fully saturated.
fn dullness(color: Rgb) -> f64 {
    (1.0 - color.luminance() as f64 / 255.0) * (1.0 - color.saturation() as f64)
}

/// Slot index of the first entry within `distance` of `color`.
fn represented_by(colors: &[Rgb], color: Rgb, distance: f32) -> Option<usize> {
    colors.iter().position(|&c| c.distance(color) <= distance)
}

/// Pixels won by each slot. Protected slots report `INFINITY`.
fn slot_importance(
    colors: &[Rgb],
    histogram: &Histogram,
    protected: &[bool],
    penalize_dull: bool,
) -> Vec<f64> {
    let mut importance = vec![0.0f64; colors.len()];
    for &(color, count) in histogram.entries() {
        importance[nearest_index(colors, color)] += count as f64;
    }
    if penalize_dull {
        let mean_share = histogram.total() as f64 / colors.len() as f64;
        for (score, &color) in importance.iter_mut().zip(colors) {
            *score -= dullness(color) * mean_share;
        }
    }
    for (score, &locked) in importance.iter_mut().zip(protected) {
        if locked {
            *score = f64::INFINITY;
        }
    }
    importance
}

/// Lowest-importance unprotected slot, first on ties.
fn weakest_slot(importance: &[f64], protected: &[bool]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, (&score, &locked)) in importance.iter().zip(protected).enumerate() {
        if locked {
            continue;
        }
        if best.map_or(true, |(_, s)| score < s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

/// Rewrite slots of `colors` in place.
///
/// Forced colors are always preserved; with `prefer_vibrant` the top
/// `preserve_salient_count` candidates are too, and the remaining
/// unrepresented candidates then refill the weakest unprotected slots.
pub(crate) fn preserve_colors(colors: &mut [Rgb], histogram: &Histogram, options: &PaletteOptions) {
    if colors.is_empty() {
        return;
    }

    let candidates = rare_salient_candidates(histogram, options);
    let mut keep: Vec<Rgb> = Vec::new();
    for &color in &options.forced_colors {
        if !keep.contains(&color) {
            keep.push(color);
        }
    }
    if options.prefer_vibrant {
        for &(color, _) in candidates.iter().take(options.preserve_salient_count) {
            if !keep.contains(&color) {
                keep.push(color);
            }
        }
    }

    let mut protected = vec![false; colors.len()];
    for &color in &keep {
        if let Some(slot) = represented_by(colors, color, options.represented_distance) {
            protected[slot] = true;
            continue;
        }
        let importance = slot_importance(colors, histogram, &protected, true);
        let Some(slot) = weakest_slot(&importance, &protected) else {
            tracing::debug!(color = %color, "no free palette slot left to preserve color");
            break;
        };
        tracing::debug!(slot, from = %colors[slot], to = %color, "preserving color");
        colors[slot] = color;
        protected[slot] = true;
    }

    if !options.prefer_vibrant {
        return;
    }

    let mut importance = slot_importance(colors, histogram, &protected, false);
    for &(color, count) in &candidates {
        if keep.contains(&color)
            || represented_by(colors, color, options.represented_distance).is_some()
        {
            continue;
        }
        let Some(slot) = weakest_slot(&importance, &protected) else {
            break;
        };
        colors[slot] = color;
        importance[slot] = count as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;

    /// 50 black, 50 light grey and one red pixel.
    fn three_tone() -> Histogram {
        let mut buffer = PixelBuffer::filled(101, 1, Rgb::BLACK).unwrap();
        for x in 50..100 {
            buffer.set_rgb(x, 0, Rgb::new(200, 200, 200), 255);
        }
        buffer.set_rgb(100, 0, Rgb::new(240, 0, 0), 255);
        Histogram::from_buffer(&buffer)
    }

    #[test]
    fn test_candidates_are_rare_and_salient() {
        let candidates = rare_salient_candidates(&three_tone(), &PaletteOptions::default());
        assert_eq!(candidates, vec![(Rgb::new(240, 0, 0), 1)]);
    }

    #[test]
    fn test_candidates_sorted_by_score() {
        let mut buffer = PixelBuffer::filled(100, 1, Rgb::BLACK).unwrap();
        buffer.set_rgb(0, 0, Rgb::new(255, 0, 0), 255);
        buffer.set_rgb(1, 0, Rgb::new(250, 250, 250), 255);
        buffer.set_rgb(2, 0, Rgb::new(250, 250, 250), 255);
        let candidates =
            rare_salient_candidates(&Histogram::from_buffer(&buffer), &PaletteOptions::default());
        assert_eq!(
            candidates,
            vec![(Rgb::new(250, 250, 250), 2), (Rgb::new(255, 0, 0), 1)]
        );
    }

    #[test]
    fn test_forced_color_replaces_dull_slot() {
        // Black wins 51 pixels but its dullness penalty makes it the
        // weakest slot.
        let mut colors = vec![Rgb::BLACK, Rgb::new(200, 200, 200)];
        let options = PaletteOptions::new().forced_colors(vec![Rgb::new(0, 0, 255)]);
        preserve_colors(&mut colors, &three_tone(), &options);
        assert_eq!(colors, vec![Rgb::new(0, 0, 255), Rgb::new(200, 200, 200)]);
    }

    #[test]
    fn test_represented_color_is_left_alone() {
        let mut colors = vec![Rgb::BLACK, Rgb::new(200, 200, 200)];
        let options = PaletteOptions::new().forced_colors(vec![Rgb::new(10, 10, 10)]);
        preserve_colors(&mut colors, &three_tone(), &options);
        assert_eq!(colors, vec![Rgb::BLACK, Rgb::new(200, 200, 200)]);
    }

    #[test]
    fn test_salient_candidates_only_with_prefer_vibrant() {
        let mut colors = vec![Rgb::BLACK, Rgb::new(200, 200, 200)];
        preserve_colors(&mut colors, &three_tone(), &PaletteOptions::default());
        assert_eq!(colors, vec![Rgb::BLACK, Rgb::new(200, 200, 200)]);

        let options = PaletteOptions::new()
            .prefer_vibrant(true)
            .preserve_salient_count(1);
        preserve_colors(&mut colors, &three_tone(), &options);
        assert!(colors.contains(&Rgb::new(240, 0, 0)));
    }

    #[test]
    fn test_protected_slots_survive() {
        let mut colors = vec![Rgb::BLACK, Rgb::new(200, 200, 200)];
        let options = PaletteOptions::new().forced_colors(vec![
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 0),
            Rgb::new(255, 0, 255),
        ]);
        preserve_colors(&mut colors, &three_tone(), &options);
        assert_eq!(colors, vec![Rgb::new(0, 0, 255), Rgb::new(0, 255, 0)]);
    }

    #[test]
    fn test_refill_replaces_weakest_slots_in_turn() {
        let green = Rgb::new(0, 255, 0);
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        let runs = [
            (Rgb::new(20, 20, 20), 500),
            (Rgb::new(100, 100, 100), 400),
            (Rgb::new(150, 150, 150), 20),
            (Rgb::new(180, 180, 180), 35),
            (green, 5),
            (red, 45),
            (blue, 40),
        ];
        let mut buffer = PixelBuffer::new(1045, 1).unwrap();
        let mut x = 0;
        for (color, count) in runs {
            for _ in 0..count {
                buffer.set_rgb(x, 0, color, 255);
                x += 1;
            }
        }
        let histogram = Histogram::from_buffer(&buffer);

        let mut colors = vec![
            Rgb::new(20, 20, 20),
            Rgb::new(100, 100, 100),
            Rgb::new(0, 250, 0),
            Rgb::new(150, 150, 150),
            Rgb::new(180, 180, 180),
        ];
        let options = PaletteOptions::new()
            .prefer_vibrant(true)
            .preserve_salient_count(1);
        preserve_colors(&mut colors, &histogram, &options);

        // Green is the top candidate and already represented, so its slot
        // stays. Red takes the 20-pixel slot and then counts 45, so blue
        // takes the 35-pixel slot instead of overwriting red.
        assert_eq!(
            colors,
            vec![
                Rgb::new(20, 20, 20),
                Rgb::new(100, 100, 100),
                Rgb::new(0, 250, 0),
                red,
                blue,
            ]
        );
    }

    #[test]
    fn test_dullness() {
        assert_eq!(dullness(Rgb::BLACK), 1.0);
        assert_eq!(dullness(Rgb::new(255, 0, 0)), 0.0);
        assert!(dullness(Rgb::WHITE).abs() < 1e-6);
    }
}
