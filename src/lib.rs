//! Pixelator - pixel-art conversion tool
//!
//! Image I/O, configuration and grid rendering around the `pixel-quant`
//! pipeline. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
