//! Public API for the pixel-quant crate.
//!
//! This module provides the high-level API: the [`Pixelator`] builder and
//! the [`PipelineError`] error type.

mod builder;
mod error;

pub use builder::{PipelineOutput, Pixelator};
pub use error::PipelineError;
