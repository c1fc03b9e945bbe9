//! Color types and the scalar metrics the pipeline is built on.
//!
//! All arithmetic happens directly on sRGB bytes. There is no gamma
//! decoding: luminance and saturation are cheap heuristics used to decide
//! which colors are visually important, not colorimetric measurements.
//!
//! - [`Rgb`]: an opaque 8-bit color with luminance, saturation and
//!   Euclidean distance helpers
//! - [`Hsl`]: hue/saturation/lightness form, used for saturation boosting
//! - [`SalienceThresholds`]: the luminance/saturation cut-offs that mark a
//!   color as salient

mod hsl;
mod rgb;
mod salience;

pub use hsl::{boost_saturation, Hsl};
pub use rgb::Rgb;
pub use salience::SalienceThresholds;
