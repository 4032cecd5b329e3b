//! Collaborator traits for per-cell visuals.
//!
//! A session creates one handle per cell through [`TilePlacement`] when it allocates its grid,
//! recolors handles through [`TileVisual`] while it runs, and hands every handle back when it is
//! cleared. The unit type `()` implements both traits for headless runs.

/// Semantic color of a tile. Actual color values belong to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileColor {
    /// Filled cell at rest.
    Active,
    /// Unfilled cell at rest.
    Inactive,
    /// Cell the walker is standing on.
    Walker,
}

impl TileColor {
    /// Resting color for a cell with the given fill state.
    #[inline]
    pub fn resting(filled: bool) -> Self {
        if filled {
            TileColor::Active
        } else {
            TileColor::Inactive
        }
    }
}

/// Creates and releases per-cell handles.
pub trait TilePlacement {
    type Handle;

    /// Called once per cell while the grid is allocated.
    fn on_cell_created(&mut self, x: u32, y: u32) -> Self::Handle;

    /// Called once per handle when the session is cleared.
    fn on_cell_destroyed(&mut self, handle: Self::Handle);
}

/// Shows a handle with a color.
pub trait TileVisual: TilePlacement {
    fn set_color(&mut self, handle: &Self::Handle, color: TileColor);
}

impl TilePlacement for () {
    type Handle = ();

    #[inline]
    fn on_cell_created(&mut self, _x: u32, _y: u32) {}

    #[inline]
    fn on_cell_destroyed(&mut self, _handle: ()) {}
}

impl TileVisual for () {
    #[inline]
    fn set_color(&mut self, _handle: &(), _color: TileColor) {}
}

/// In-memory tile visuals: one color slot per created cell, addressed by `(x, y)`.
///
/// Useful for rendering a session without an engine, and for inspecting what a session showed.
#[derive(Debug, Clone, Default)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    colors: Vec<Option<TileColor>>,
    live: usize,
}

impl ColorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-sized for a `width x height` grid; it still grows if a larger cell is created.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            colors: vec![None; width as usize * height as usize],
            live: 0,
        }
    }

    /// Last color shown at `(x, y)`, or `None` if the cell has no live tile or was never colored.
    pub fn color(&self, x: u32, y: u32) -> Option<TileColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.colors
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .flatten()
    }

    /// Number of tiles created and not yet destroyed.
    pub fn live_tiles(&self) -> usize {
        self.live
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Handle into a [`ColorBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub x: u32,
    pub y: u32,
}

impl TilePlacement for ColorBuffer {
    type Handle = TileId;

    fn on_cell_created(&mut self, x: u32, y: u32) -> TileId {
        if x >= self.width || y >= self.height {
            let width = self.width.max(x + 1);
            let height = self.height.max(y + 1);
            let mut colors = vec![None; width as usize * height as usize];
            for yy in 0..self.height {
                for xx in 0..self.width {
                    colors[(yy * width + xx) as usize] =
                        self.colors[(yy * self.width + xx) as usize];
                }
            }
            self.width = width;
            self.height = height;
            self.colors = colors;
        }
        self.live += 1;
        TileId { x, y }
    }

    fn on_cell_destroyed(&mut self, handle: TileId) {
        if let Some(slot) = self
            .colors
            .get_mut((handle.y * self.width + handle.x) as usize)
        {
            *slot = None;
        }
        self.live = self.live.saturating_sub(1);
    }
}

impl TileVisual for ColorBuffer {
    fn set_color(&mut self, handle: &TileId, color: TileColor) {
        if let Some(slot) = self
            .colors
            .get_mut((handle.y * self.width + handle.x) as usize)
        {
            *slot = Some(color);
        }
    }
}
