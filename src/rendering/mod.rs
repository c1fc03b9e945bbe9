pub mod grid;
pub mod png_codec;

pub use grid::{render_grid_only, render_gridded, GridLayout, GridStyle};
pub use png_codec::{decode_png, encode_png, read_png, save_png};
