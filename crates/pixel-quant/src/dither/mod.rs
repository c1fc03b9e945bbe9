//! Palette remapping with optional error diffusion.
//!
//! [`apply_palette`] maps every opaque pixel onto a palette. Pixels close
//! to a forced color take that color verbatim; the rest take the nearest
//! palette entry, optionally biased toward vibrant entries, and may
//! diffuse their quantization error to unvisited neighbors through one of
//! the [`DitherKernel`] tables.
//!
//! Pixels are always visited in raster order (left to right, top to
//! bottom); every kernel table assumes that order.

mod kernel;
mod options;
mod remap;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use kernel::*;
pub use options::RemapOptions;
pub use remap::apply_palette;

/// Error diffusion kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherKernel {
    /// Nearest-color mapping only.
    #[default]
    None,
    /// Floyd-Steinberg, 4 neighbors.
    FloydSteinberg,
    /// Simplified Floyd-Steinberg, 3 neighbors.
    FalseFloydSteinberg,
    /// Stucki, 12 neighbors over 3 rows.
    Stucki,
    /// Atkinson, 6 neighbors over 3 rows.
    Atkinson,
    /// Jarvis-Judice-Ninke, 12 neighbors over 3 rows.
    Jarvis,
    /// Burkes, 7 neighbors over 2 rows.
    Burkes,
    /// Sierra, 10 neighbors over 3 rows.
    Sierra,
    /// Two-row Sierra, 7 neighbors.
    TwoSierra,
    /// Sierra Lite, 3 neighbors.
    SierraLite,
}

impl DitherKernel {
    /// Every selector value, `None` first.
    pub const ALL: [DitherKernel; 10] = [
        DitherKernel::None,
        DitherKernel::FloydSteinberg,
        DitherKernel::FalseFloydSteinberg,
        DitherKernel::Stucki,
        DitherKernel::Atkinson,
        DitherKernel::Jarvis,
        DitherKernel::Burkes,
        DitherKernel::Sierra,
        DitherKernel::TwoSierra,
        DitherKernel::SierraLite,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            DitherKernel::None => "None",
            DitherKernel::FloydSteinberg => "FloydSteinberg",
            DitherKernel::FalseFloydSteinberg => "FalseFloydSteinberg",
            DitherKernel::Stucki => "Stucki",
            DitherKernel::Atkinson => "Atkinson",
            DitherKernel::Jarvis => "Jarvis",
            DitherKernel::Burkes => "Burkes",
            DitherKernel::Sierra => "Sierra",
            DitherKernel::TwoSierra => "TwoSierra",
            DitherKernel::SierraLite => "SierraLite",
        }
    }

    /// The coefficient table, or `None` for nearest-color mapping.
    pub fn table(self) -> Option<&'static Kernel> {
        match self {
            DitherKernel::None => None,
            DitherKernel::FloydSteinberg => Some(&FLOYD_STEINBERG),
            DitherKernel::FalseFloydSteinberg => Some(&FALSE_FLOYD_STEINBERG),
            DitherKernel::Stucki => Some(&STUCKI),
            DitherKernel::Atkinson => Some(&ATKINSON),
            DitherKernel::Jarvis => Some(&JARVIS),
            DitherKernel::Burkes => Some(&BURKES),
            DitherKernel::Sierra => Some(&SIERRA),
            DitherKernel::TwoSierra => Some(&TWO_SIERRA),
            DitherKernel::SierraLite => Some(&SIERRA_LITE),
        }
    }
}

impl fmt::Display for DitherKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown dither kernel name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dither kernel: {0}")]
pub struct ParseKernelError(pub String);

impl FromStr for DitherKernel {
    type Err = ParseKernelError;

    /// Case-insensitive; `-`, `_` and spaces are ignored, so
    /// `floyd-steinberg` and `TWO_SIERRA` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        Self::ALL
            .into_iter()
            .find(|kernel| kernel.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ParseKernelError(s.to_string()))
    }
}

/// Sliding window of per-row diffusion error.
///
/// Only `row_depth` rows are kept: `rows[0]` is the row being processed,
/// `rows[1]` the next one, and so on.
#[derive(Debug)]
pub struct ErrorBuffer {
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a zeroed buffer of `row_depth` rows (a kernel's `max_dy + 1`).
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth.max(1)).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Error accumulated so far for pixel `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error to pixel `x` of the row `row_offset` rows below.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for (acc, e) in self.rows[row_offset][x].iter_mut().zip(error) {
                *acc += e;
            }
        }
    }

    /// Drop the current row and append a zeroed one.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}
