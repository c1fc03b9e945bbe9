#![allow(clippy::module_inception)]

//! pixel-quant: pixel-art downsampling, palette building and dithering
//!
//! The crate turns an arbitrary RGBA image into a small, palette-limited
//! grid and back into a display-sized raster. Every stage is a pure
//! function over in-memory [`PixelBuffer`]s; nothing here touches the
//! filesystem.
//!
//! # Quick Start
//!
//! The [`Pixelator`] builder runs the whole pipeline:
//!
//! ```
//! use pixel_quant::{PixelBuffer, Pixelator, Rgb};
//!
//! let source = PixelBuffer::filled(100, 100, Rgb::new(200, 40, 40)).unwrap();
//! let output = Pixelator::new().result_size(10, 10).colors_count(4).run(&source).unwrap();
//!
//! assert_eq!(output.small.width(), 10);
//! assert_eq!(output.display.width(), 100);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! source PixelBuffer
//!     |
//!     v
//! downsample        (proportional blocks, one estimator per block)
//!     |
//!     v
//! build_palette     (histogram -> median cut -> preservation -> boost)
//!     |
//!     v
//! apply_palette     (forced colors, biased nearest match, error diffusion)
//!     |
//!     v
//! upscale           (nearest neighbor)
//! ```
//!
//! Each stage is public, so callers can run them individually:
//! [`downsample`], [`build_palette`], [`apply_palette`] and [`upscale`].
//!
//! # Colors
//!
//! All distances are Euclidean in 8-bit RGB. Luminance uses the Rec. 709
//! weights on raw sRGB bytes, and saturation is `(max - min) / max`. A
//! color is *salient* when either metric exceeds its
//! [`SalienceThresholds`] cut-off; salient colors get special treatment in
//! the `Salient` estimator, the palette preservation pass and the vibrant
//! bias of the remapper.

pub mod api;
pub mod buffer;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod pixelate;


pub use api::{PipelineError, PipelineOutput, Pixelator};
pub use buffer::PixelBuffer;
pub use color::{boost_saturation, Hsl, Rgb, SalienceThresholds};
pub use dither::{apply_palette, DitherKernel, ErrorBuffer, Kernel, ParseKernelError, RemapOptions};
pub use output::upscale;
pub use palette::{build_palette, Histogram, Palette, PaletteError, PaletteOptions, ParseColorError};
pub use pixelate::{
    block_bounds, downsample, estimate, BlockRegion, ParseMethodError, PixelationMethod,
};
