//! Fixed-size fill grid used by the walker and the hole filler.
//!
//! This module defines [`Grid`] and [`Cell`]. Cells are stored in a flat array indexed by
//! `y * width + x`; coordinates are signed so that out-of-range positions produced by walker
//! math can be represented, checked and clamped.
use glam::IVec2;

use crate::error::{Error, Result};

/// Fill state of a single grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Whether the cell has been visited or closed as a hole.
    pub filled: bool,
}

/// Rectangular grid of [`Cell`]s with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of `width * height` unfilled cells.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true when `(x, y)` lies inside `[0, width) x [0, height)`.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Flat index of an in-bounds coordinate.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Coordinate for a flat index.
    #[inline]
    pub fn position_of(&self, index: usize) -> IVec2 {
        let w = self.width as usize;
        IVec2::new((index % w) as i32, (index / w) as i32)
    }

    /// Clamps each axis of `pos` independently into the grid.
    #[inline]
    pub fn clamp(&self, pos: IVec2) -> IVec2 {
        IVec2::new(
            pos.x.clamp(0, self.width as i32 - 1),
            pos.y.clamp(0, self.height as i32 - 1),
        )
    }

    /// Reads the cell at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<Cell> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Writes the fill state at `(x, y)` and reports whether the cell changed.
    ///
    /// Cells never return to unfilled, so `filled = false` leaves the cell as it is.
    pub fn set(&mut self, x: i32, y: i32, filled: bool) -> Result<bool> {
        let idx = self.checked_index(x, y)?;
        let cell = &mut self.cells[idx];
        if filled && !cell.filled {
            cell.filled = true;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Fills a position already known to be inside the grid. Returns `true` if it was unfilled.
    pub(crate) fn fill(&mut self, pos: IVec2) -> bool {
        debug_assert!(
            self.contains(pos.x, pos.y),
            "fill at {pos} outside the {}x{} grid",
            self.width,
            self.height
        );
        match self.index_of(pos.x, pos.y) {
            Some(idx) => !std::mem::replace(&mut self.cells[idx].filled, true),
            None => false,
        }
    }

    /// Fill state at `(x, y)`; out-of-bounds positions read as unfilled.
    #[inline]
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y)
            .map(|idx| self.cells[idx].filled)
            .unwrap_or(false)
    }

    /// Counts filled cells with a full scan.
    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|c| c.filled).count()
    }

    /// Iterates the coordinates of filled cells in row-major order.
    pub fn filled_positions(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.filled)
            .map(|(i, _)| self.position_of(i))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize> {
        self.index_of(x, y).ok_or(Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_unfilled() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.count_filled(), 0);
        assert_eq!(grid.get(3, 2), Ok(Cell { filled: false }));
    }

    #[test]
    fn get_and_set_reject_out_of_bounds() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(
            grid.get(2, 0),
            Err(Error::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            })
        );
        assert!(grid.set(-1, 1, true).is_err());
        assert!(grid.set(0, 2, true).is_err());
        assert_eq!(grid.count_filled(), 0);
    }

    #[test]
    fn set_reports_change_and_never_unfills() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(grid.set(1, 2, true), Ok(true));
        assert_eq!(grid.set(1, 2, true), Ok(false));
        assert_eq!(grid.set(1, 2, false), Ok(false));
        assert!(grid.is_filled(1, 2));
        assert_eq!(grid.count_filled(), 1);
    }

    #[test]
    fn fill_marks_in_bounds_cell_once() {
        let mut grid = Grid::new(3, 2);
        assert!(grid.fill(IVec2::new(2, 1)));
        assert!(!grid.fill(IVec2::new(2, 1)));
        assert_eq!(grid.filled_positions().collect::<Vec<_>>(), vec![IVec2::new(2, 1)]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "outside the 3x2 grid")]
    fn fill_outside_grid_fails_loudly() {
        let mut grid = Grid::new(3, 2);
        grid.fill(IVec2::new(3, 0));
    }

    #[test]
    fn index_and_position_are_row_major() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index_of(1, 2), Some(9));
        assert_eq!(grid.position_of(9), IVec2::new(1, 2));
        assert_eq!(grid.index_of(4, 0), None);
    }

    #[test]
    fn clamp_is_independent_per_axis() {
        let grid = Grid::new(5, 3);
        assert_eq!(grid.clamp(IVec2::new(-4, 10)), IVec2::new(0, 2));
        assert_eq!(grid.clamp(IVec2::new(9, 1)), IVec2::new(4, 1));
        assert_eq!(grid.clamp(IVec2::new(2, -1)), IVec2::new(2, 0));
    }

    #[test]
    fn out_of_bounds_reads_as_unfilled() {
        let mut grid = Grid::new(1, 1);
        grid.set(0, 0, true).unwrap();
        assert!(grid.is_filled(0, 0));
        assert!(!grid.is_filled(-1, 0));
        assert!(!grid.is_filled(0, 1));
    }

    #[test]
    fn filled_positions_lists_filled_cells() {
        let mut grid = Grid::new(3, 2);
        grid.set(2, 0, true).unwrap();
        grid.set(0, 1, true).unwrap();
        let filled: Vec<_> = grid.filled_positions().collect();
        assert_eq!(filled, vec![IVec2::new(2, 0), IVec2::new(0, 1)]);
    }
}
