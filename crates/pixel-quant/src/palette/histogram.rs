//! Color histogram of opaque pixels.

use std::collections::HashMap;

use crate::buffer::PixelBuffer;
use crate::color::Rgb;

/// Pixel counts per exact color, in first-seen (row-major) order.
///
/// Transparent pixels are never counted.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    entries: Vec<(Rgb, u32)>,
    total: u64,
}

impl Histogram {
    /// Count the opaque pixels of `buffer`.
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let mut entries: Vec<(Rgb, u32)> = Vec::new();
        let mut slots: HashMap<Rgb, usize> = HashMap::new();
        let mut total = 0u64;

        for color in buffer.opaque_colors() {
            total += 1;
            match slots.get(&color) {
                Some(&slot) => entries[slot].1 += 1,
                None => {
                    slots.insert(color, entries.len());
                    entries.push((color, 1));
                }
            }
        }

        Self { entries, total }
    }

    /// `(color, count)` pairs in first-seen order.
    #[inline]
    pub fn entries(&self) -> &[(Rgb, u32)] {
        &self.entries
    }

    /// Distinct colors in first-seen order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().map(|&(color, _)| color)
    }

    /// Number of distinct colors.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Number of opaque pixels counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// True when the buffer had no opaque pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
