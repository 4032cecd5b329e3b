#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use walk_fill::prelude::*;

/// Full fills of the larger grids take tens of milliseconds per iteration.
pub const SAMPLE_SIZE: usize = 10;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

pub fn walk_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in grid cells touched per iteration.
pub fn cells_throughput(cells: usize) -> Throughput {
    Throughput::Elements(cells.max(1) as u64)
}

/// Square fixed-seed config; the seed mixes in the size so each size walks its own path.
pub fn seeded_config(size: u32, fraction: f64, flight_chance: f64) -> GenerationConfig {
    GenerationConfig::new(size, size)
        .with_target_fill_fraction(fraction)
        .with_flights(flight_chance, (4, 12))
        .with_seed(0xA11CE_u64 ^ size as u64)
}

/// Walks a square grid to `fraction` full without a session, for hole-closing inputs.
pub fn walked_grid(size: u32, fraction: f64) -> Grid {
    let config = seeded_config(size, fraction, 0.01);
    let mut grid = Grid::new(size, size);
    let mut stepper = WalkStepper::from_config(&config);
    let target = config.target_cells();
    while !stepper.reached(target) {
        stepper.step(&mut grid);
    }
    grid
}
