//! PNG decoding (image acquisition) and encoding (export).

use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use pixel_quant::{Histogram, PixelBuffer, Rgb};

use crate::error::RenderError;

/// Decode PNG bytes into an RGBA buffer.
///
/// Indexed and 16-bit images are normalized to 8-bit RGB(A); greyscale is
/// expanded to RGB.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let raw: Cow<[u8]> = match info.color_type {
        png::ColorType::Rgb | png::ColorType::Rgba => Cow::Borrowed(data),
        png::ColorType::Grayscale => Cow::Owned(data.iter().flat_map(|&v| [v, v, v]).collect()),
        png::ColorType::GrayscaleAlpha => Cow::Owned(
            data.chunks_exact(2)
                .flat_map(|c| [c[0], c[0], c[0], c[1]])
                .collect(),
        ),
        other => return Err(RenderError::UnsupportedColorType(format!("{other:?}"))),
    };

    let buffer = PixelBuffer::from_raw(info.width as usize, info.height as usize, &raw)?;
    tracing::debug!(
        width = buffer.width(),
        height = buffer.height(),
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Ok(buffer)
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<PixelBuffer, RenderError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Encode a buffer as PNG.
///
/// Fully opaque images with at most 256 colors are written as indexed PNG
/// at the smallest bit depth that fits (1, 2, 4 or 8 bits); everything
/// else is 8-bit RGBA. With `optimize`, the result is re-compressed with
/// oxipng, falling back to the plain encoding if that fails.
pub fn encode_png(buffer: &PixelBuffer, optimize: bool) -> Result<Vec<u8>, RenderError> {
    let width = buffer.width() as u32;
    let height = buffer.height() as u32;

    let histogram = Histogram::from_buffer(buffer);
    let png_bytes = if buffer.is_fully_opaque() && histogram.distinct() <= 256 {
        let palette: Vec<Rgb> = histogram.colors().collect();
        let indices: Vec<u8> = buffer
            .opaque_colors()
            .map(|c| palette.iter().position(|&p| p == c).unwrap_or(0) as u8)
            .collect();

        let (depth, bits) = match palette.len() {
            0..=2 => (png::BitDepth::One, 1),
            3..=4 => (png::BitDepth::Two, 2),
            5..=16 => (png::BitDepth::Four, 4),
            _ => (png::BitDepth::Eight, 8),
        };
        let plte: Vec<u8> = palette.iter().flat_map(|c| c.to_bytes()).collect();
        let packed = if bits == 8 {
            indices
        } else {
            pack_nbits(&indices, width, bits)
        };
        write_png(width, height, png::ColorType::Indexed, depth, Some(&plte), &packed)?
    } else {
        write_png(
            width,
            height,
            png::ColorType::Rgba,
            png::BitDepth::Eight,
            None,
            buffer.pixels(),
        )?
    };

    if !optimize {
        return Ok(png_bytes);
    }

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

/// Encode and write a PNG file, returning the number of bytes written.
pub fn save_png(path: &Path, buffer: &PixelBuffer, optimize: bool) -> Result<usize, RenderError> {
    let bytes = encode_png(buffer, optimize)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}

/// Encode packed pixel data as a PNG.
fn write_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    packed: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack palette indices into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
