//! Grid overlay renderer.
//!
//! Draws the logical pixel grid of a small quantized image at an integer
//! scale, centered in a target canvas. Used to print pixel-art templates.

use pixel_quant::{PixelBuffer, Rgb};
use tiny_skia::{Paint, Pixmap, Rect, Transform};

use crate::error::{GridError, RenderError};

/// Grid line appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStyle {
    /// Line thickness in target pixels
    pub thickness: u32,
    /// Line color
    pub color: Rgb,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            thickness: 1,
            color: Rgb::BLACK,
        }
    }
}

/// Placement of the scaled grid inside the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub scale: u32,
    pub offset_x: u32,
    pub offset_y: u32,
    pub area_width: u32,
    pub area_height: u32,
}

impl GridLayout {
    /// Largest integer scale that fits, centered.
    pub fn compute(
        width: usize,
        height: usize,
        target_width: u32,
        target_height: u32,
    ) -> Result<Self, GridError> {
        let too_small = GridError::TargetTooSmall {
            width,
            height,
            target_width,
            target_height,
        };
        if width == 0 || height == 0 {
            return Err(too_small);
        }
        let scale_x = target_width as usize / width;
        let scale_y = target_height as usize / height;
        let scale = scale_x.min(scale_y) as u32;
        if scale == 0 {
            return Err(too_small);
        }
        let area_width = width as u32 * scale;
        let area_height = height as u32 * scale;
        Ok(Self {
            scale,
            offset_x: (target_width - area_width) / 2,
            offset_y: (target_height - area_height) / 2,
            area_width,
            area_height,
        })
    }
}

/// The image at integer scale with grid lines over it, on a transparent
/// `target_width x target_height` canvas.
pub fn render_gridded(
    small: &PixelBuffer,
    target_width: u32,
    target_height: u32,
    style: &GridStyle,
) -> Result<PixelBuffer, RenderError> {
    render(small, target_width, target_height, style, true)
}

/// Only the grid lines, on a transparent canvas.
pub fn render_grid_only(
    small: &PixelBuffer,
    target_width: u32,
    target_height: u32,
    style: &GridStyle,
) -> Result<PixelBuffer, RenderError> {
    render(small, target_width, target_height, style, false)
}

fn render(
    small: &PixelBuffer,
    target_width: u32,
    target_height: u32,
    style: &GridStyle,
    with_image: bool,
) -> Result<PixelBuffer, RenderError> {
    let layout = GridLayout::compute(small.width(), small.height(), target_width, target_height)?;
    let mut pixmap = Pixmap::new(target_width, target_height).ok_or(RenderError::PixmapAllocation)?;

    if with_image {
        draw_image(&mut pixmap, small, &layout);
    }
    draw_grid_overlay(&mut pixmap, small.width(), small.height(), &layout, style);

    tracing::debug!(
        scale = layout.scale,
        offset_x = layout.offset_x,
        offset_y = layout.offset_y,
        with_image,
        "Rendered grid"
    );
    pixmap_to_buffer(&pixmap)
}

fn solid_paint(color: Rgb, alpha: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = false;
    paint
}

fn fill(pixmap: &mut Pixmap, x: u32, y: u32, w: u32, h: u32, paint: &Paint) {
    if let Some(rect) = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32) {
        pixmap.fill_rect(rect, paint, Transform::identity(), None);
    }
}

/// Nearest-neighbor blit of `small` into the layout area.
fn draw_image(pixmap: &mut Pixmap, small: &PixelBuffer, layout: &GridLayout) {
    let s = layout.scale;
    for y in 0..small.height() {
        for x in 0..small.width() {
            let alpha = small.alpha(x, y);
            if alpha == 0 {
                continue;
            }
            let paint = solid_paint(small.rgb(x, y), alpha);
            fill(
                pixmap,
                layout.offset_x + x as u32 * s,
                layout.offset_y + y as u32 * s,
                s,
                s,
                &paint,
            );
        }
    }
}

/// Lines at every logical pixel boundary, plus closing lines on the right
/// and bottom edges when the scale is above 1.
fn draw_grid_overlay(
    pixmap: &mut Pixmap,
    width: usize,
    height: usize,
    layout: &GridLayout,
    style: &GridStyle,
) {
    let paint = solid_paint(style.color, 255);
    let t = style.thickness;
    let GridLayout {
        scale,
        offset_x,
        offset_y,
        area_width,
        area_height,
    } = *layout;

    for x in 0..=width as u32 {
        fill(pixmap, offset_x + x * scale, offset_y, t, area_height, &paint);
    }
    for y in 0..=height as u32 {
        fill(pixmap, offset_x, offset_y + y * scale, area_width, t, &paint);
    }

    if scale > 1 {
        let right = (offset_x + area_width).saturating_sub(t);
        fill(pixmap, right, offset_y, t, area_height, &paint);
        let bottom = (offset_y + area_height).saturating_sub(t);
        fill(pixmap, offset_x, bottom, area_width, t, &paint);
    }
}

fn pixmap_to_buffer(pixmap: &Pixmap) -> Result<PixelBuffer, RenderError> {
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Ok(PixelBuffer::from_rgba(
        pixmap.width() as usize,
        pixmap.height() as usize,
        data,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn checker() -> PixelBuffer {
        let mut small = PixelBuffer::filled(2, 2, Rgb::new(255, 0, 0)).unwrap();
        small.set_rgb(1, 0, Rgb::new(0, 0, 255), 255);
        small.set_rgb(0, 1, Rgb::new(0, 0, 255), 255);
        small
    }

    #[test]
    fn test_layout_centers_integer_scale() {
        let layout = GridLayout::compute(2, 2, 25, 21).unwrap();
        assert_eq!(
            layout,
            GridLayout {
                scale: 10,
                offset_x: 2,
                offset_y: 0,
                area_width: 20,
                area_height: 20,
            }
        );
    }

    #[test]
    fn test_layout_target_too_small() {
        let err = GridLayout::compute(32, 32, 31, 100).unwrap_err();
        assert_eq!(
            err,
            GridError::TargetTooSmall {
                width: 32,
                height: 32,
                target_width: 31,
                target_height: 100,
            }
        );
    }

    #[test]
    fn test_gridded_image() {
        let out = render_gridded(&checker(), 20, 20, &GridStyle::default()).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
        // Interior of each cell keeps its color
        assert_eq!(out.rgb(5, 5), Rgb::new(255, 0, 0));
        assert_eq!(out.rgb(15, 5), Rgb::new(0, 0, 255));
        assert_eq!(out.rgb(5, 15), Rgb::new(0, 0, 255));
        assert_eq!(out.rgb(15, 15), Rgb::new(255, 0, 0));
        // Lines at cell boundaries and the closing edges
        assert_eq!(out.rgba(0, 7), [0, 0, 0, 255]);
        assert_eq!(out.rgba(10, 7), [0, 0, 0, 255]);
        assert_eq!(out.rgba(19, 7), [0, 0, 0, 255]);
        assert_eq!(out.rgba(7, 19), [0, 0, 0, 255]);
    }

    #[test]
    fn test_grid_only_is_transparent_inside_cells() {
        let style = GridStyle {
            thickness: 2,
            color: Rgb::WHITE,
        };
        let out = render_grid_only(&checker(), 22, 20, &style).unwrap();
        // Area is 20 wide, offset 1
        assert!(out.is_transparent(0, 5));
        assert_eq!(out.rgba(1, 5), [255, 255, 255, 255]);
        assert_eq!(out.rgba(2, 5), [255, 255, 255, 255]);
        assert!(out.is_transparent(5, 5));
        assert_eq!(out.rgba(11, 5), [255, 255, 255, 255]);
        // Closing line sits inside the area
        assert_eq!(out.rgba(20, 5), [255, 255, 255, 255]);
        assert!(out.is_transparent(15, 15));
    }
}
