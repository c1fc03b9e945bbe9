//! Unified error type for the pixel-quant public API.

use thiserror::Error;

/// Errors raised by the pipeline.
///
/// Degenerate *content* (fully transparent regions, zero requested colors,
/// empty images) is never an error: it resolves through documented
/// fallbacks. Only malformed *shapes* are reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A buffer or target size had a zero dimension.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// A pixel byte buffer matched neither the RGB nor the RGBA length
    /// for its declared size.
    #[error("unexpected buffer length {len} for {width}x{height} image")]
    UnexpectedBufferShape {
        /// Actual byte length
        len: usize,
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = PipelineError::InvalidDimensions {
            width: 0,
            height: 32,
        };
        assert_eq!(err.to_string(), "invalid dimensions: 0x32");
    }

    #[test]
    fn test_unexpected_shape_message() {
        let err = PipelineError::UnexpectedBufferShape {
            len: 10,
            width: 2,
            height: 2,
        };
        assert_eq!(
            err.to_string(),
            "unexpected buffer length 10 for 2x2 image"
        );
    }
}
