pub mod config;

pub use config::{
    compute_match_size, pick_color, GridConfig, PixelateConfig, SizeRequest, SizeUpdate,
    CONFIG_ENV,
};
