pub mod pixelation;

pub use pixelation::PixelationService;
