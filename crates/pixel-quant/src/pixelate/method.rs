//! Pixelation method selector.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::estimator::{self, BlockRegion};
use crate::buffer::PixelBuffer;
use crate::color::{Rgb, SalienceThresholds};

/// Signature shared by every block estimator.
pub(crate) type Estimator = fn(&PixelBuffer, &BlockRegion, &SalienceThresholds) -> Rgb;

/// How a block of source pixels is reduced to one color.
///
/// | Method    | Picks                                              |
/// |-----------|----------------------------------------------------|
/// | `Nearest` | the pixel at the block center (transparency ignored) |
/// | `Average` | the rounded mean of opaque pixels                   |
/// | `Mode`    | the most frequent opaque color                      |
/// | `Salient` | the brightest, then most saturated, salient pixel   |
///
/// Every method except `Nearest` falls back along
/// `Salient -> Mode -> Average -> white` when a block has nothing to offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelationMethod {
    /// Sample the single pixel nearest the block center.
    #[default]
    Nearest,
    /// Mean of the opaque pixels.
    Average,
    /// Most frequent exact color, ties to the first seen.
    Mode,
    /// Brightest or most saturated salient pixel.
    Salient,
}

impl PixelationMethod {
    /// All methods, in declaration order.
    pub const ALL: [PixelationMethod; 4] = [
        PixelationMethod::Nearest,
        PixelationMethod::Average,
        PixelationMethod::Mode,
        PixelationMethod::Salient,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            PixelationMethod::Nearest => "nearest",
            PixelationMethod::Average => "average",
            PixelationMethod::Mode => "mode",
            PixelationMethod::Salient => "salient",
        }
    }

    /// The estimator function implementing this method.
    pub(crate) fn estimator(self) -> Estimator {
        match self {
            PixelationMethod::Nearest => estimator::nearest,
            PixelationMethod::Average => estimator::average,
            PixelationMethod::Mode => estimator::mode,
            PixelationMethod::Salient => estimator::salient,
        }
    }
}

impl fmt::Display for PixelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown pixelation method name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pixelation method: {0} (expected nearest, average, mode or salient)")]
pub struct ParseMethodError(pub String);

impl FromStr for PixelationMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseMethodError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("nearest".parse(), Ok(PixelationMethod::Nearest));
        assert_eq!("Average".parse(), Ok(PixelationMethod::Average));
        assert_eq!(" MODE ".parse(), Ok(PixelationMethod::Mode));
        assert_eq!("salient".parse(), Ok(PixelationMethod::Salient));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "bilinear".parse::<PixelationMethod>().unwrap_err();
        assert_eq!(err, ParseMethodError("bilinear".to_string()));
    }

    #[test]
    fn test_display_round_trips() {
        for method in PixelationMethod::ALL {
            assert_eq!(method.to_string().parse(), Ok(method));
        }
    }
}
