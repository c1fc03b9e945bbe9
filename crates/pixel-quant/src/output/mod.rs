//! Output rasters: nearest-neighbor upscaling of quantized grids.

mod upscale;

pub use upscale::upscale;
