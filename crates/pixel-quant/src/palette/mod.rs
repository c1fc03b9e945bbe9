//! Palette construction and lookup.
//!
//! [`build_palette`] turns an image into at most `N` representative
//! colors: a histogram of opaque pixels feeds a median-cut quantizer, and
//! an optional preservation pass puts back rare but visually important
//! colors (plus any colors the user forced) that averaging washed out.

mod builder;
mod error;
mod histogram;
mod median_cut;
mod options;
mod palette;
mod preserve;

pub use builder::build_palette;
pub use error::{PaletteError, ParseColorError};
pub use histogram::Histogram;
pub use options::PaletteOptions;
pub use palette::Palette;
