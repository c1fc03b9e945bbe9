//! Assertion helpers for tests.

use pixel_quant::{Palette, PixelBuffer, Rgb};
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.len() > 8 && bytes[..8] == PNG_SIGNATURE,
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert buffer dimensions
pub fn assert_size(buffer: &PixelBuffer, width: usize, height: usize) {
    assert_eq!(
        (buffer.width(), buffer.height()),
        (width, height),
        "Unexpected buffer size"
    );
}

/// Assert every opaque pixel of `buffer` is a palette entry
pub fn assert_in_palette(buffer: &PixelBuffer, palette: &Palette) {
    for color in buffer.opaque_colors() {
        assert!(
            palette.contains(color),
            "{color} is not in palette {:?}",
            palette.to_hex()
        );
    }
}

/// Assert the opaque pixel at (x, y) has `expected` color
pub fn assert_pixel(buffer: &PixelBuffer, x: usize, y: usize, expected: Rgb) {
    assert_eq!(
        buffer.rgba(x, y),
        [expected.r, expected.g, expected.b, 255],
        "Unexpected pixel at {x},{y}"
    );
}
