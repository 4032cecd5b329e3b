//! Generation configuration.
//!
//! [`GenerationConfig`] is fixed for the lifetime of a session. Build it with
//! [`GenerationConfig::new`] and the `with_*` setters, then check it with
//! [`GenerationConfig::validate`] (sessions validate on construction).
use tracing::warn;

use crate::error::{Error, Result};
use crate::holes::HoleCheck;

/// Configuration for a random-walk fill session.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationConfig {
    /// Number of grid columns.
    pub grid_width: u32,
    /// Number of grid rows.
    pub grid_height: u32,
    /// Fraction of cells that must be filled before the walk stops, in (0, 1].
    pub target_fill_fraction: f64,
    /// Upper bound on walk ticks per second of wall time.
    pub ticks_per_second: f64,
    /// Seed both random streams with [`GenerationConfig::seed`].
    pub use_fixed_seed: bool,
    /// Seed used when `use_fixed_seed` is set.
    pub seed: u64,
    /// Probability in [0, 1] that a tick is a flight instead of a cardinal step.
    pub flight_chance: f64,
    /// Flight distance range `[min, max)` in cells.
    pub flight_distance_range: (i32, i32),
    /// Close holes once the walk has reached its target.
    pub fill_holes_after_completion: bool,
    /// Neighborhood used when closing holes.
    pub hole_check_strategy: HoleCheck,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 32,
            target_fill_fraction: 0.4,
            ticks_per_second: 60.0,
            use_fixed_seed: false,
            seed: 0,
            flight_chance: 0.0,
            flight_distance_range: (2, 6),
            fill_holes_after_completion: false,
            hole_check_strategy: HoleCheck::Cardinal4,
        }
    }
}

impl GenerationConfig {
    /// Creates a new [`GenerationConfig`] for a `width x height` grid.
    pub fn new(grid_width: u32, grid_height: u32) -> Self {
        Self {
            grid_width,
            grid_height,
            ..Default::default()
        }
    }

    /// Sets the target fill fraction.
    pub fn with_target_fill_fraction(mut self, fraction: f64) -> Self {
        self.target_fill_fraction = fraction;
        self
    }

    /// Sets the tick rate.
    pub fn with_ticks_per_second(mut self, ticks_per_second: f64) -> Self {
        self.ticks_per_second = ticks_per_second;
        self
    }

    /// Uses a fixed seed for both random streams.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.use_fixed_seed = true;
        self.seed = seed;
        self
    }

    /// Seeds from fresh OS entropy on every generation.
    pub fn with_random_seed(mut self) -> Self {
        self.use_fixed_seed = false;
        self
    }

    /// Sets the flight chance and distance range.
    pub fn with_flights(mut self, chance: f64, distance_range: (i32, i32)) -> Self {
        self.flight_chance = chance;
        self.flight_distance_range = distance_range;
        self
    }

    /// Enables hole closing after the walk with the given strategy.
    pub fn with_hole_filling(mut self, strategy: HoleCheck) -> Self {
        self.fill_holes_after_completion = true;
        self.hole_check_strategy = strategy;
        self
    }

    /// Disables hole closing after the walk.
    pub fn without_hole_filling(mut self) -> Self {
        self.fill_holes_after_completion = false;
        self
    }

    /// Number of cells in the grid.
    pub fn total_cells(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Number of filled cells at which the walk stops: `ceil(cells * fraction)`, at least 1.
    pub fn target_cells(&self) -> usize {
        let exact = self.total_cells() as f64 * self.target_fill_fraction;
        let target = exact.ceil().max(1.0) as usize;
        target.min(self.total_cells())
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(Error::invalid_config(
                "grid_width and grid_height must be > 0",
            ));
        }
        let max_side = i32::MAX as u32;
        if self.grid_width > max_side || self.grid_height > max_side {
            return Err(Error::invalid_config(format!(
                "grid_width and grid_height must be <= {max_side}"
            )));
        }
        if !(self.target_fill_fraction > 0.0 && self.target_fill_fraction <= 1.0) {
            return Err(Error::invalid_config(
                "target_fill_fraction must be in (0, 1]",
            ));
        }
        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
            return Err(Error::invalid_config("ticks_per_second must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.flight_chance) {
            return Err(Error::invalid_config("flight_chance must be in [0, 1]"));
        }
        let (min, max) = self.flight_distance_range;
        if min > max {
            return Err(Error::invalid_config(format!(
                "flight_distance_range min ({min}) must be <= max ({max})"
            )));
        }
        if min < 0 {
            return Err(Error::invalid_config(
                "flight_distance_range must not be negative",
            ));
        }

        if self.target_fill_fraction >= 1.0 && self.flight_chance > 0.0 {
            warn!(
                "Filling every cell with flight chance {} may take a long time.",
                self.flight_chance
            );
        }
        Ok(())
    }
}
