//! HSL conversion for saturation boosting.
//!
//! HSL keeps hue and lightness fixed while saturation is scaled, so a boost
//! makes colors more vivid without shifting them toward another hue.

use super::Rgb;

/// A color in hue/saturation/lightness form.
///
/// `h` is in degrees (0.0..360.0); `s` and `l` are in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees
    pub h: f32,
    /// Saturation (0.0..=1.0)
    pub s: f32,
    /// Lightness (0.0..=1.0)
    pub l: f32,
}

impl From<Rgb> for Hsl {
    fn from(color: Rgb) -> Self {
        let r = color.r as f32 / 255.0;
        let g = color.g as f32 / 255.0;
        let b = color.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return Self { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Self { h: h * 60.0, s, l }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        if hsl.s == 0.0 {
            let v = hsl.l * 255.0;
            return Rgb::from_f32(v, v, v);
        }

        let q = if hsl.l < 0.5 {
            hsl.l * (1.0 + hsl.s)
        } else {
            hsl.l + hsl.s - hsl.l * hsl.s
        };
        let p = 2.0 * hsl.l - q;
        let h = hsl.h / 360.0;

        Rgb::from_f32(
            hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_channel(p, q, h) * 255.0,
            hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
        )
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Scale a color's HSL saturation by `factor`, clamped to 0.0..=1.0.
///
/// Greys (saturation 0) are returned unchanged for any factor.
pub fn boost_saturation(color: Rgb, factor: f32) -> Rgb {
    let mut hsl = Hsl::from(color);
    hsl.s = (hsl.s * factor).clamp(0.0, 1.0);
    Rgb::from(hsl)
}
