//! Post-process closing of holes left by the walker.
//!
//! A hole is an unfilled cell whose in-bounds neighbors (per [`HoleCheck`]) are all filled.
//! Neighbors outside the grid never block a fill. [`fill_holes`] evaluates every cell against
//! the grid as it stood when the pass started, so fills made in a pass never cascade into
//! other cells of the same pass.
use glam::IVec2;

use crate::grid::Grid;

const CARDINAL4: [IVec2; 4] = [
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
];

const DIAGONAL4: [IVec2; 4] = [
    IVec2::new(-1, -1),
    IVec2::new(-1, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 1),
];

const FULL8: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// Neighborhood used to decide whether an unfilled cell is a hole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HoleCheck {
    /// Left, right, down and up neighbors.
    #[default]
    Cardinal4,
    /// The full 3x3 block around the cell.
    Full8,
    /// The four diagonal neighbors.
    Diagonal4,
}

impl HoleCheck {
    /// Neighbor offsets checked by this strategy.
    pub fn offsets(self) -> &'static [IVec2] {
        match self {
            HoleCheck::Cardinal4 => &CARDINAL4,
            HoleCheck::Full8 => &FULL8,
            HoleCheck::Diagonal4 => &DIAGONAL4,
        }
    }

    /// Returns true when `(x, y)` is unfilled and every in-bounds neighbor is filled.
    pub fn is_hole(self, grid: &Grid, x: i32, y: i32) -> bool {
        grid.contains(x, y) && !grid.is_filled(x, y) && neighbors_filled(grid, x, y, self.offsets())
    }
}

#[inline]
fn neighbors_filled(grid: &Grid, x: i32, y: i32, offsets: &[IVec2]) -> bool {
    offsets.iter().all(|o| {
        let (nx, ny) = (x + o.x, y + o.y);
        !grid.contains(nx, ny) || grid.is_filled(nx, ny)
    })
}

/// Fills every hole of `grid` under `strategy` and returns the cells filled, in row-major order.
///
/// Already-filled cells are untouched. Running the same strategy again on the result fills
/// nothing: neighborhoods are symmetric, so a cell that was blocked by an unfilled neighbor
/// also blocked that neighbor from being filled.
pub fn fill_holes(grid: &mut Grid, strategy: HoleCheck) -> Vec<IVec2> {
    let offsets = strategy.offsets();
    let holes: Vec<IVec2> = (0..grid.len())
        .filter(|&idx| !grid.cells()[idx].filled)
        .map(|idx| grid.position_of(idx))
        .filter(|p| neighbors_filled(grid, p.x, p.y, offsets))
        .collect();

    for &p in &holes {
        grid.fill(p);
    }
    holes
}
