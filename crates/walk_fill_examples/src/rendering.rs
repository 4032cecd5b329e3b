use std::path::Path;

use image::{Rgb, RgbImage};
use tracing_subscriber::{fmt, EnvFilter};
use walk_fill::prelude::*;

/// Installs a `tracing` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore the error if a subscriber is already set.
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

/// RGB values for each [`TileColor`] plus the background of tiles never shown.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub active: [u8; 3],
    pub inactive: [u8; 3],
    pub walker: [u8; 3],
    pub background: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            active: [222, 214, 190],
            inactive: [40, 44, 52],
            walker: [220, 40, 40],
            background: [40, 44, 52],
        }
    }
}

impl Palette {
    pub fn color(&self, color: Option<TileColor>) -> [u8; 3] {
        match color {
            Some(TileColor::Active) => self.active,
            Some(TileColor::Inactive) => self.inactive,
            Some(TileColor::Walker) => self.walker,
            None => self.background,
        }
    }
}

/// Output settings for PNG rendering.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Pixels per cell edge.
    pub cell_px: u32,
    pub palette: Palette,
    /// Cells to tint with `highlight` (e.g. closed holes).
    pub highlight_cells: Vec<glam::IVec2>,
    pub highlight: [u8; 3],
}

impl RenderConfig {
    pub fn new(cell_px: u32) -> Self {
        Self {
            cell_px: cell_px.max(1),
            palette: Palette::default(),
            highlight_cells: Vec::new(),
            highlight: [70, 160, 230],
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_highlight(mut self, cells: Vec<glam::IVec2>, color: [u8; 3]) -> Self {
        self.highlight_cells = cells;
        self.highlight = color;
        self
    }
}

/// Renders fill state only: filled cells use `active`, the rest `inactive`.
pub fn render_grid_to_png(
    grid: &Grid,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut img = blank(grid.width(), grid.height(), config);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let color = TileColor::resting(grid.is_filled(x as i32, y as i32));
            paint_cell(&mut img, x, y, config, config.palette.color(Some(color)));
        }
    }
    finish(img, grid.height(), config, path)
}

/// Renders what the tile collaborator was last told to show, including the walker highlight.
pub fn render_tiles_to_png(
    tiles: &ColorBuffer,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut img = blank(tiles.width(), tiles.height(), config);
    for y in 0..tiles.height() {
        for x in 0..tiles.width() {
            let color = config.palette.color(tiles.color(x, y));
            paint_cell(&mut img, x, y, config, color);
        }
    }
    finish(img, tiles.height(), config, path)
}

/// Text rendering, top row first: `#` filled, `.` unfilled, `@` at `walker` if given.
pub fn grid_to_ascii(grid: &Grid, walker: Option<glam::IVec2>) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height() as usize);
    for y in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let ch = if walker == Some(glam::IVec2::new(x, y)) {
                '@'
            } else if grid.is_filled(x, y) {
                '#'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn blank(width: u32, height: u32, config: &RenderConfig) -> RgbImage {
    RgbImage::from_pixel(
        width * config.cell_px,
        height * config.cell_px,
        Rgb(config.palette.background),
    )
}

fn finish(
    mut img: RgbImage,
    rows: u32,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    for p in &config.highlight_cells {
        if p.x >= 0 && p.y >= 0 && (p.y as u32) < rows {
            paint_cell(&mut img, p.x as u32, p.y as u32, config, config.highlight);
        }
    }
    img.save(path.as_ref())?;
    tracing::info!("Wrote {}.", path.as_ref().display());
    Ok(())
}

fn paint_cell(img: &mut RgbImage, x: u32, y: u32, config: &RenderConfig, color: [u8; 3]) {
    let rows = img.height() / config.cell_px;
    if x * config.cell_px >= img.width() || y >= rows {
        return;
    }
    // Image rows grow downwards; grid y grows upwards.
    let py0 = (rows - 1 - y) * config.cell_px;
    let px0 = x * config.cell_px;
    for py in py0..py0 + config.cell_px {
        for px in px0..px0 + config.cell_px {
            img.put_pixel(px, py, Rgb(color));
        }
    }
}
