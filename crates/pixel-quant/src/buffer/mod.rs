//! The RGBA pixel container shared by every pipeline stage.

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;
