//! Block color estimation and proportional downsampling.
//!
//! The source image is partitioned into a `target_width x target_height`
//! grid of blocks. Block edges come from proportional division
//! (`floor(i * W / target_width)`), so blocks are uneven when the source
//! size is not a multiple of the target. Each block is reduced to one
//! color by the [`PixelationMethod`] in use.

mod downsample;
mod estimator;
mod method;

pub use downsample::{block_bounds, downsample};
pub use estimator::{estimate, BlockRegion};
pub use method::{ParseMethodError, PixelationMethod};
