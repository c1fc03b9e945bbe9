use pixel_quant::{DitherKernel, PixelBuffer, PixelationMethod, Pixelator, Rgb, SalienceThresholds};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::rendering::grid::GridStyle;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "PIXELATOR_CONFIG";

/// Pipeline configuration loaded from a YAML file.
///
/// Every field is optional in the file; missing fields take the defaults
/// below (32x32 result, 16 colors, nearest sampling, no dithering).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PixelateConfig {
    /// Result grid width
    pub result_width: usize,

    /// Result grid height
    pub result_height: usize,

    /// Skip downsampling and only quantize
    pub keep_original_size: bool,

    /// Derive one result dimension from the other using the source aspect
    pub match_aspect: bool,

    /// Maximum palette size
    pub colors_count: usize,

    /// nearest, average, mode or salient
    pub pixelation_method: String,

    /// Luminance cut-off for salient colors (0-255)
    pub luminance_threshold: f32,

    /// Saturation cut-off for salient colors (0-1)
    pub saturation_threshold: f32,

    /// Build a palette and remap onto it
    pub enable_reduce_colors: bool,

    /// Diffuse quantization error with `dith_kern`
    pub enable_dithering: bool,

    /// Kernel name, e.g. "FloydSteinberg" or "sierra-lite"
    pub dith_kern: String,

    /// Diffusion strength (0-1)
    pub dith_delta: f32,

    /// Preserve rare vibrant colors and boost saturation
    pub prefer_vibrant: bool,

    /// Rare salient colors given a protected palette slot
    pub preserve_salient_count: usize,

    /// Hex colors that must survive quantization
    pub forced_colors: Vec<String>,

    /// Output width; set together with `display_height` or not at all
    pub display_width: Option<usize>,

    /// Output height (defaults to the source height)
    pub display_height: Option<usize>,

    /// Grid overlay settings
    pub grid: GridConfig,

    /// Re-compress written PNGs with oxipng
    pub optimize_png: bool,
}

impl Default for PixelateConfig {
    fn default() -> Self {
        Self {
            result_width: 32,
            result_height: 32,
            keep_original_size: false,
            match_aspect: true,
            colors_count: 16,
            pixelation_method: "nearest".to_string(),
            luminance_threshold: 200.0,
            saturation_threshold: 0.6,
            enable_reduce_colors: true,
            enable_dithering: false,
            dith_kern: "None".to_string(),
            dith_delta: 0.5,
            prefer_vibrant: false,
            preserve_salient_count: 4,
            forced_colors: Vec::new(),
            display_width: None,
            display_height: None,
            grid: GridConfig::default(),
            optimize_png: true,
        }
    }
}

/// Grid overlay settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Line thickness in pixels
    pub thickness: u32,

    /// Line color as hex
    pub color: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            thickness: 1,
            color: "#000000".to_string(),
        }
    }
}

impl GridConfig {
    /// Parse into a drawable style.
    pub fn style(&self) -> Result<GridStyle, ConfigError> {
        Ok(GridStyle {
            thickness: self.thickness,
            color: parse_color(&self.color)?,
        })
    }
}

impl PixelateConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        config.validate()
    }

    /// Load from `path`, else from `$PIXELATOR_CONFIG`, else use defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));
        match path {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Clamp ranged values and reject values that cannot work.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.dith_delta = self.dith_delta.clamp(0.0, 1.0);
        self.luminance_threshold = self.luminance_threshold.clamp(0.0, 255.0);
        self.saturation_threshold = self.saturation_threshold.clamp(0.0, 1.0);

        if !self.keep_original_size {
            for (field, value) in [
                ("result_width", self.result_width),
                ("result_height", self.result_height),
            ] {
                if value == 0 {
                    return Err(ConfigError::InvalidValue {
                        field,
                        reason: "must be at least 1".to_string(),
                    });
                }
            }
        }
        if self.display_width == Some(0) || self.display_height == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "display size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.display_width.is_some() != self.display_height.is_some() {
            return Err(ConfigError::InvalidValue {
                field: "display size",
                reason: "display_width and display_height must be set together".to_string(),
            });
        }
        if self.grid.thickness == 0 {
            return Err(ConfigError::InvalidValue {
                field: "grid.thickness",
                reason: "must be at least 1".to_string(),
            });
        }

        self.method()?;
        self.kernel()?;
        self.parsed_forced_colors()?;
        self.grid.style()?;
        Ok(self)
    }

    pub fn method(&self) -> Result<PixelationMethod, ConfigError> {
        self.pixelation_method
            .parse()
            .map_err(|e: pixel_quant::ParseMethodError| ConfigError::InvalidValue {
                field: "pixelation_method",
                reason: e.to_string(),
            })
    }

    pub fn kernel(&self) -> Result<DitherKernel, ConfigError> {
        self.dith_kern
            .parse()
            .map_err(|e: pixel_quant::ParseKernelError| ConfigError::InvalidValue {
                field: "dith_kern",
                reason: e.to_string(),
            })
    }

    pub fn thresholds(&self) -> SalienceThresholds {
        SalienceThresholds::new(self.luminance_threshold, self.saturation_threshold)
    }

    /// `forced_colors` parsed from hex.
    pub fn parsed_forced_colors(&self) -> Result<Vec<Rgb>, ConfigError> {
        self.forced_colors.iter().map(|s| parse_color(s)).collect()
    }

    /// Result grid size for a `source_width x source_height` image.
    ///
    /// `width`/`height` are explicit overrides. With `match_aspect`, a
    /// single override (or the configured width when there is none)
    /// determines the other dimension; two overrides are used as given.
    /// `None` means keep the source size.
    pub fn result_size(
        &self,
        source_width: usize,
        source_height: usize,
        width: Option<usize>,
        height: Option<usize>,
    ) -> Option<(usize, usize)> {
        if self.keep_original_size {
            return None;
        }
        let mut w = width.unwrap_or(self.result_width);
        let mut h = height.unwrap_or(self.result_height);
        if self.match_aspect {
            let request = match (width, height) {
                (Some(new_width), None) => SizeRequest {
                    new_width: Some(new_width),
                    ..Default::default()
                },
                (None, Some(new_height)) => SizeRequest {
                    new_height: Some(new_height),
                    ..Default::default()
                },
                (None, None) => SizeRequest {
                    current_width: Some(w),
                    ..Default::default()
                },
                (Some(_), Some(_)) => SizeRequest::default(),
            };
            match compute_match_size(source_width, source_height, request) {
                SizeUpdate::Width(v) => w = v,
                SizeUpdate::Height(v) => h = v,
                SizeUpdate::Unchanged => {}
            }
        }
        Some((w, h))
    }

    /// Build the pipeline. `picked` colors are appended to the configured
    /// forced colors.
    pub fn pixelator(
        &self,
        result_size: Option<(usize, usize)>,
        picked: &[Rgb],
    ) -> Result<Pixelator, ConfigError> {
        let mut forced = self.parsed_forced_colors()?;
        for &color in picked {
            if !forced.contains(&color) {
                forced.push(color);
            }
        }

        let mut pixelator = Pixelator::new()
            .colors_count(self.colors_count)
            .method(self.method()?)
            .thresholds(self.thresholds())
            .reduce_colors(self.enable_reduce_colors)
            .dithering(self.enable_dithering)
            .kernel(self.kernel()?)
            .dith_delta(self.dith_delta)
            .prefer_vibrant(self.prefer_vibrant)
            .preserve_salient_count(self.preserve_salient_count)
            .forced_colors(forced);

        pixelator = match result_size {
            Some((w, h)) => pixelator.result_size(w, h),
            None => pixelator.keep_source_size(),
        };
        if let (Some(w), Some(h)) = (self.display_width, self.display_height) {
            pixelator = pixelator.display_size(w, h);
        }
        Ok(pixelator)
    }
}

fn parse_color(value: &str) -> Result<Rgb, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidColor {
        value: value.to_string(),
        source,
    })
}

/// Color of the source pixel at `(x, y)`, for picking forced colors.
pub fn pick_color(source: &PixelBuffer, x: usize, y: usize) -> Result<Rgb, ConfigError> {
    if x >= source.width() || y >= source.height() {
        return Err(ConfigError::PickOutOfBounds {
            x,
            y,
            width: source.width(),
            height: source.height(),
        });
    }
    Ok(source.rgb(x, y))
}

/// Which result dimension the user just changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeRequest {
    pub new_width: Option<usize>,
    pub new_height: Option<usize>,
    pub current_width: Option<usize>,
}

/// Dimension to update so the result keeps the source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUpdate {
    Width(usize),
    Height(usize),
    Unchanged,
}

/// Match the result size to the source aspect ratio.
///
/// A new width sets the height, a new height sets the width, and with
/// neither the current width sets the height. Results are rounded and at
/// least 1.
pub fn compute_match_size(
    original_width: usize,
    original_height: usize,
    request: SizeRequest,
) -> SizeUpdate {
    if original_width == 0 || original_height == 0 {
        return SizeUpdate::Unchanged;
    }
    let aspect = original_height as f64 / original_width as f64;
    let scaled = |v: f64| (v.round() as usize).max(1);

    if let Some(w) = request.new_width {
        SizeUpdate::Height(scaled(w as f64 * aspect))
    } else if let Some(h) = request.new_height {
        SizeUpdate::Width(scaled(h as f64 / aspect))
    } else if let Some(w) = request.current_width {
        SizeUpdate::Height(scaled(w as f64 * aspect))
    } else {
        SizeUpdate::Unchanged
    }
}
