//! Test images and files.

use std::path::{Path, PathBuf};

use pixel_quant::{PixelBuffer, Rgb};
use pixelator::rendering::encode_png;

/// Mid grey used as the dominant background
pub const BACKGROUND: Rgb = Rgb::new(110, 110, 110);

/// Saturated highlight, rare enough to be averaged away by median cut
pub const HIGHLIGHT: Rgb = Rgb::new(230, 20, 20);

/// Horizontal red ramp, vertical green ramp, constant blue.
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1).max(1)) as u8;
            let g = (y * 255 / (height - 1).max(1)) as u8;
            buffer.set_rgb(x, y, Rgb::new(r, g, 128), 255);
        }
    }
    buffer
}

/// Background with a blue lower half and a 2x2 highlight at (10, 10).
pub fn scene_with_highlight(width: usize, height: usize) -> PixelBuffer {
    let mut buffer = PixelBuffer::filled(width, height, BACKGROUND).unwrap();
    for y in height / 2..height {
        for x in 0..width {
            buffer.set_rgb(x, y, Rgb::new(30, 60, 170), 255);
        }
    }
    for y in 10..12 {
        for x in 10..12 {
            buffer.set_rgb(x, y, HIGHLIGHT, 255);
        }
    }
    buffer
}

/// Opaque checkerboard of two colors with `cell` pixel squares.
pub fn checkerboard(width: usize, height: usize, cell: usize, a: Rgb, b: Rgb) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let color = if (x / cell + y / cell) % 2 == 0 { a } else { b };
            buffer.set_rgb(x, y, color, 255);
        }
    }
    buffer
}

/// Encode `buffer` without optimization and write it into `dir`.
pub fn write_png(dir: &Path, name: &str, buffer: &PixelBuffer) -> PathBuf {
    let path = dir.join(name);
    let bytes = encode_png(buffer, false).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Write a YAML config file into `dir`.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("pixelator.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
