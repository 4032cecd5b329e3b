#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    grid_to_ascii, init_tracing, render_grid_to_png, render_tiles_to_png, Palette, RenderConfig,
};
