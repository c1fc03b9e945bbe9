use std::path::PathBuf;

use pixel_quant::{ParseColorError, PipelineError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Unsupported PNG color type: {0}")]
    UnsupportedColorType(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Target {target_width}x{target_height} is smaller than the {width}x{height} grid")]
    TargetTooSmall {
        width: usize,
        height: usize,
        target_width: u32,
        target_height: u32,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Invalid color {value:?}: {source}")]
    InvalidColor {
        value: String,
        source: ParseColorError,
    },

    #[error("Pick {x},{y} is outside the {width}x{height} source image")]
    PickOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}
