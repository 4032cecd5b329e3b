//! The random walker.
//!
//! [`WalkStepper`] advances one logical step per call to [`WalkStepper::step`]. The first step
//! drops the walker on a uniformly chosen cell; later steps either move one cell in a cardinal
//! direction or, with probability `flight_chance`, jump a random distance at a random angle.
//! Every move is clamped into the grid per axis, and a cell is counted the first time it fills.
use glam::{DVec2, IVec2};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::grid::Grid;
use crate::random::{Direction, RandomSource};

/// Position and progress of the walker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkerState {
    /// Current cell, always inside the grid.
    pub position: IVec2,
    /// Cells filled by the walk so far (plus closed holes, once the session fills them).
    pub filled_count: usize,
    /// Number of steps taken, including the initial placement.
    pub ticks: u64,
}

/// How the walker got to its new cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepKind {
    /// Initial placement.
    Start,
    /// Single cardinal step.
    Step(Direction),
    /// Long jump.
    Flight {
        /// Heading in degrees, `[0, 360)`.
        angle_degrees: f64,
        /// Distance in cells before clamping.
        distance: i32,
    },
}

/// Result of a single step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Cell the walker left (equal to `to` for the initial placement).
    pub from: IVec2,
    /// Cell the walker arrived at, after clamping.
    pub to: IVec2,
    pub kind: StepKind,
    /// Whether `to` was filled by this step.
    pub newly_filled: bool,
}

/// Landing cell of a flight from `from`, clamped into a `width x height` grid.
///
/// The displacement is `(round(d * sin a), round(d * cos a))`, so an angle of 0 points along +y.
pub fn flight_landing(
    from: IVec2,
    distance: i32,
    angle_degrees: f64,
    width: u32,
    height: u32,
) -> IVec2 {
    let rad = angle_degrees.to_radians();
    let offset = DVec2::new(rad.sin(), rad.cos()) * distance as f64;
    let target = from + offset.round().as_ivec2();
    IVec2::new(
        target.x.clamp(0, width as i32 - 1),
        target.y.clamp(0, height as i32 - 1),
    )
}

/// Stateful walker over a [`Grid`].
#[derive(Clone, Debug)]
pub struct WalkStepper {
    random: RandomSource,
    flight_chance: f64,
    flight_distance_range: (i32, i32),
    walker: Option<WalkerState>,
}

impl WalkStepper {
    pub fn new(random: RandomSource, flight_chance: f64, flight_distance_range: (i32, i32)) -> Self {
        Self {
            random,
            flight_chance,
            flight_distance_range,
            walker: None,
        }
    }

    /// Creates a stepper with fresh random streams for `config`.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(
            RandomSource::new(config.use_fixed_seed, config.seed),
            config.flight_chance,
            config.flight_distance_range,
        )
    }

    /// Walker state, or `None` before the first step.
    pub fn walker(&self) -> Option<&WalkerState> {
        self.walker.as_ref()
    }

    /// Cells filled so far.
    pub fn filled_count(&self) -> usize {
        self.walker.map_or(0, |w| w.filled_count)
    }

    /// Returns true once `target_cells` cells are filled.
    pub fn reached(&self, target_cells: usize) -> bool {
        self.filled_count() >= target_cells
    }

    /// Adds cells filled outside the walk (closed holes) to the running count.
    pub(crate) fn add_filled(&mut self, count: usize) {
        if let Some(w) = self.walker.as_mut() {
            w.filled_count += count;
        }
    }

    /// Advances the walker by one step on `grid`.
    pub fn step(&mut self, grid: &mut Grid) -> StepOutcome {
        let Some(mut walker) = self.walker else {
            return self.place(grid);
        };

        let from = walker.position;
        let (to, kind) = if self.random.flight.float() < self.flight_chance {
            let angle_degrees = self.random.flight.float() * 360.0;
            let (min, max) = self.flight_distance_range;
            let distance = self.random.flight.int(min, max);
            let to = flight_landing(from, distance, angle_degrees, grid.width(), grid.height());
            debug!(
                "Flight from {from} to {to} ({distance} cells at {angle_degrees:.1} degrees)."
            );
            (
                to,
                StepKind::Flight {
                    angle_degrees,
                    distance,
                },
            )
        } else {
            let dir = self.random.walk.direction();
            (grid.clamp(from + dir.offset()), StepKind::Step(dir))
        };

        let newly_filled = grid.fill(to);
        walker.position = to;
        walker.ticks += 1;
        if newly_filled {
            walker.filled_count += 1;
        }
        self.walker = Some(walker);

        StepOutcome {
            from,
            to,
            kind,
            newly_filled,
        }
    }

    fn place(&mut self, grid: &mut Grid) -> StepOutcome {
        let x = self.random.walk.int(0, grid.width() as i32);
        let y = self.random.walk.int(0, grid.height() as i32);
        let to = IVec2::new(x, y);
        let newly_filled = grid.fill(to);
        self.walker = Some(WalkerState {
            position: to,
            filled_count: usize::from(newly_filled),
            ticks: 1,
        });
        StepOutcome {
            from: to,
            to,
            kind: StepKind::Start,
            newly_filled,
        }
    }
}
