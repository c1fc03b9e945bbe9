//! 8-bit RGB color type.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// Rec. 709 luma coefficients applied directly to sRGB bytes.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// An opaque color with 8-bit channels.
///
/// Alpha is carried separately by [`PixelBuffer`](crate::PixelBuffer);
/// an `Rgb` always describes the visible color of an opaque pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Pure white, the fallback for regions and images with no opaque pixels.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Pure black, the palette returned when zero colors are requested.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create a color from float channels, rounding and clamping each to 0..=255.
    #[inline]
    pub fn from_f32(r: f32, g: f32, b: f32) -> Self {
        Self::new(to_channel(r), to_channel(g), to_channel(b))
    }

    /// Channels as floats, for error diffusion arithmetic.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Perceptual brightness on the 0..=255 scale.
    ///
    /// `L = 0.2126 R + 0.7152 G + 0.0722 B`
    #[inline]
    pub fn luminance(self) -> f32 {
        LUMA_R * self.r as f32 + LUMA_G * self.g as f32 + LUMA_B * self.b as f32
    }

    /// Saturation in 0.0..=1.0, defined as `(max - min) / max`.
    ///
    /// Black has saturation 0.
    #[inline]
    pub fn saturation(self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        if max == 0 {
            return 0.0;
        }
        let min = self.r.min(self.g).min(self.b);
        (max - min) as f32 / max as f32
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance in RGB space, `sqrt(dr² + dg² + db²)`.
    #[inline]
    pub fn distance(self, other: Rgb) -> f32 {
        (self.distance_sq(other) as f32).sqrt()
    }

    /// Format as an uppercase `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a hex color string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use pixel_quant::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // #RGB expands each nibble: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_rec709() {
        assert_eq!(Rgb::BLACK.luminance(), 0.0);
        assert!((Rgb::WHITE.luminance() - 255.0).abs() < 1e-3);
        // Green dominates perceived brightness
        assert!(Rgb::new(0, 255, 0).luminance() > Rgb::new(255, 0, 0).luminance());
        assert!(Rgb::new(255, 0, 0).luminance() > Rgb::new(0, 0, 255).luminance());
    }

    #[test]
    fn test_saturation() {
        assert_eq!(Rgb::BLACK.saturation(), 0.0, "black must not divide by zero");
        assert_eq!(Rgb::WHITE.saturation(), 0.0);
        assert_eq!(Rgb::new(128, 128, 128).saturation(), 0.0);
        assert_eq!(Rgb::new(255, 0, 0).saturation(), 1.0);
        assert!((Rgb::new(200, 100, 100).saturation() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_distance() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(3, 4, 0);
        assert_eq!(a.distance_sq(b), 25);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert_eq!(b.distance(a), a.distance(b));
    }

    #[test]
    fn test_from_f32_clamps_and_rounds() {
        assert_eq!(Rgb::from_f32(-20.0, 127.5, 300.0), Rgb::new(0, 128, 255));
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#FF8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("ff8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(" #abc ".parse::<Rgb>().unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(
            "#12345".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidLength
        );
        assert!(matches!(
            "#GG0000".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidHex(_)
        ));
        assert_eq!(
            "#ééé".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidLength
        );
    }

    #[test]
    fn test_hex_display() {
        let color = Rgb::new(200, 10, 10);
        assert_eq!(color.to_hex(), "#C80A0A");
        assert_eq!(color.to_string(), "#C80A0A");
        assert_eq!(color.to_hex().parse::<Rgb>().unwrap(), color);
    }
}
