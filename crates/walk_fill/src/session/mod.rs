//! Generation sessions: grid allocation, paced walking, hole closing and teardown.
//!
//! A [`GenerationSession`] moves through [`SessionState`]s:
//! `Unstarted -> Running -> (HoleFilling) -> Done`, and back to `Unstarted` on
//! [`GenerationSession::clear`]. Illegal calls return [`Error::InvalidTransition`] and leave the
//! session untouched.
//!
//! Ticks can be driven three ways: [`GenerationSession::tick`] steps immediately,
//! [`GenerationSession::poll`] steps only when the pacing scheduler allows it (for callers that
//! own a frame loop), and [`GenerationSession::run`] blocks on a [`PacingClock`] until the walk
//! is done or the [`StopSignal`] is raised.
use glam::IVec2;
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::holes::{fill_holes, HoleCheck};
use crate::walk::{StepKind, StepOutcome, WalkStepper, WalkerState};

pub mod events;
pub mod pacing;
pub mod tiles;

use events::{EventSink, GenerationEvent};
use pacing::{PacingClock, StopSignal, TickScheduler};
use tiles::{TileColor, TileVisual};

/// Lifecycle state of a [`GenerationSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No grid allocated.
    Unstarted,
    /// Walking towards the fill target.
    Running,
    /// Closing holes after the walk.
    HoleFilling,
    /// Finished; grid is inspectable.
    Done,
}

/// Grid, walker and tile handles of a generated map.
struct Generation<H> {
    grid: Grid,
    stepper: WalkStepper,
    /// Tile handles indexed like the grid cells.
    handles: Vec<H>,
}

/// Orchestrates one random-walk fill over a grid of tiles.
pub struct GenerationSession<T: TileVisual = ()> {
    config: GenerationConfig,
    target_cells: usize,
    tiles: T,
    state: SessionState,
    generation: Option<Generation<T::Handle>>,
    scheduler: TickScheduler,
    stop: StopSignal,
}

impl GenerationSession<()> {
    /// Creates a session without tile visuals.
    pub fn headless(config: GenerationConfig) -> Result<Self> {
        Self::try_new(config, ())
    }
}

impl<T: TileVisual> GenerationSession<T> {
    /// Validates `config` and creates an unstarted session.
    pub fn try_new(config: GenerationConfig, tiles: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            target_cells: config.target_cells(),
            scheduler: TickScheduler::new(config.ticks_per_second),
            config,
            tiles,
            state: SessionState::Unstarted,
            generation: None,
            stop: StopSignal::new(),
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    /// Filled cells at which the walk stops.
    pub fn target_cells(&self) -> usize {
        self.target_cells
    }

    /// The grid, once generated.
    pub fn grid(&self) -> Option<&Grid> {
        self.generation.as_ref().map(|g| &g.grid)
    }

    /// The walker, once placed.
    pub fn walker(&self) -> Option<&WalkerState> {
        self.generation.as_ref().and_then(|g| g.stepper.walker())
    }

    pub fn filled_count(&self) -> usize {
        self.walker().map_or(0, |w| w.filled_count)
    }

    /// Filled share of all cells.
    pub fn fill_fraction(&self) -> f64 {
        self.filled_count() as f64 / self.config.total_cells() as f64
    }

    /// Tile handle of `(x, y)`, once generated.
    pub fn handle(&self, x: i32, y: i32) -> Option<&T::Handle> {
        let generation = self.generation.as_ref()?;
        let idx = generation.grid.index_of(x, y)?;
        generation.handles.get(idx)
    }

    pub fn tiles(&self) -> &T {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut T {
        &mut self.tiles
    }

    /// Shared stop flag; raising it stops [`Self::run`] and [`Self::poll`] between ticks.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Allocates the grid and tiles and starts the walk.
    pub fn generate(&mut self) -> Result<()> {
        self.generate_with_events(&mut ())
    }

    pub fn generate_with_events(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.require(SessionState::Unstarted, "generate")?;

        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let grid = Grid::new(width, height);

        let mut slots: Vec<Option<T::Handle>> = (0..grid.len()).map(|_| None).collect();
        for x in 0..width {
            for y in 0..height {
                let idx = y as usize * width as usize + x as usize;
                slots[idx] = Some(self.tiles.on_cell_created(x, y));
            }
        }
        let handles: Vec<T::Handle> = slots.into_iter().flatten().collect();

        self.generation = Some(Generation {
            grid,
            stepper: WalkStepper::from_config(&self.config),
            handles,
        });
        self.scheduler.reset();
        self.stop.reset();
        self.state = SessionState::Running;

        info!(
            "Generating {}x{} grid | target: {} cells | flight chance: {}.",
            width, height, self.target_cells, self.config.flight_chance,
        );
        sink.send(GenerationEvent::Started {
            size: (width, height),
            target_cells: self.target_cells,
            seed: self.config.use_fixed_seed.then_some(self.config.seed),
        });
        Ok(())
    }

    /// Runs one walk step immediately, ignoring pacing.
    pub fn tick(&mut self) -> Result<StepOutcome> {
        self.tick_with_events(&mut ())
    }

    pub fn tick_with_events(&mut self, sink: &mut dyn EventSink) -> Result<StepOutcome> {
        self.require(SessionState::Running, "tick")?;
        self.advance(sink)
            .ok_or(Error::InvalidTransition {
                operation: "tick",
                state: self.state,
            })
    }

    /// Runs at most one tick if the scheduler allows it at the clock's current time.
    ///
    /// Intended to be called once per frame by a caller that owns the loop. Does nothing unless
    /// the session is running and not stopped.
    pub fn poll(&mut self, clock: &mut dyn PacingClock) -> SessionState {
        self.poll_with_events(clock, &mut ())
    }

    pub fn poll_with_events(
        &mut self,
        clock: &mut dyn PacingClock,
        sink: &mut dyn EventSink,
    ) -> SessionState {
        if self.state == SessionState::Running && !self.stop.is_raised() {
            let now = clock.now();
            if self.scheduler.is_due(now) {
                self.scheduler.record_tick(now);
                self.advance(sink);
            }
        }
        self.state
    }

    /// Walks at the configured pace until done or stopped.
    ///
    /// There is no bound on the number of ticks; see [`Self::run_with_budget`].
    pub fn run(&mut self, clock: &mut dyn PacingClock) -> Result<SessionState> {
        self.run_paced(clock, None, &mut ())
    }

    pub fn run_with_events(
        &mut self,
        clock: &mut dyn PacingClock,
        sink: &mut dyn EventSink,
    ) -> Result<SessionState> {
        self.run_paced(clock, None, sink)
    }

    /// Like [`Self::run`], but returns after at most `max_ticks` ticks.
    pub fn run_with_budget(
        &mut self,
        clock: &mut dyn PacingClock,
        max_ticks: u64,
    ) -> Result<SessionState> {
        self.run_paced(clock, Some(max_ticks), &mut ())
    }

    fn run_paced(
        &mut self,
        clock: &mut dyn PacingClock,
        max_ticks: Option<u64>,
        sink: &mut dyn EventSink,
    ) -> Result<SessionState> {
        if self.state == SessionState::Unstarted {
            return Err(Error::InvalidTransition {
                operation: "run",
                state: self.state,
            });
        }

        let mut executed = 0u64;
        while self.state == SessionState::Running {
            if self.stop.is_raised() {
                debug!("Stop requested after {executed} ticks.");
                break;
            }
            if max_ticks.is_some_and(|max| executed >= max) {
                break;
            }

            let now = clock.now();
            if !self.scheduler.is_due(now) {
                if let Some(due) = self.scheduler.next_due() {
                    clock.sleep_until(due);
                }
                continue;
            }
            self.scheduler.record_tick(now);
            self.advance(sink);
            executed += 1;
        }
        Ok(self.state)
    }

    /// Runs a hole-closing pass on a finished map and returns the number of cells filled.
    ///
    /// Can be repeated with different strategies.
    pub fn fill_holes(&mut self, strategy: HoleCheck) -> Result<usize> {
        self.fill_holes_with_events(strategy, &mut ())
    }

    pub fn fill_holes_with_events(
        &mut self,
        strategy: HoleCheck,
        sink: &mut dyn EventSink,
    ) -> Result<usize> {
        self.require(SessionState::Done, "fill holes")?;
        Ok(self.close_holes(strategy, sink))
    }

    /// Releases every tile and discards the grid and walker.
    pub fn clear(&mut self) -> Result<()> {
        self.clear_with_events(&mut ())
    }

    pub fn clear_with_events(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        if self.state == SessionState::Unstarted {
            return Err(Error::InvalidTransition {
                operation: "clear",
                state: self.state,
            });
        }

        if let Some(generation) = self.generation.take() {
            let (width, height) = (generation.grid.width(), generation.grid.height());
            let mut slots: Vec<Option<T::Handle>> =
                generation.handles.into_iter().map(Some).collect();
            for x in 0..width {
                for y in 0..height {
                    let idx = y as usize * width as usize + x as usize;
                    if let Some(handle) = slots[idx].take() {
                        self.tiles.on_cell_destroyed(handle);
                    }
                }
            }
        }
        self.scheduler.reset();
        self.state = SessionState::Unstarted;

        debug!("Session cleared.");
        sink.send(GenerationEvent::Cleared);
        Ok(())
    }

    fn require(&self, expected: SessionState, operation: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                operation,
                state: self.state,
            })
        }
    }

    fn advance(&mut self, sink: &mut dyn EventSink) -> Option<StepOutcome> {
        let generation = self.generation.as_mut()?;
        let outcome = generation.stepper.step(&mut generation.grid);

        if outcome.kind != StepKind::Start {
            let resting = TileColor::resting(
                generation
                    .grid
                    .is_filled(outcome.from.x, outcome.from.y),
            );
            set_color(&mut self.tiles, generation, outcome.from, resting);
        }
        set_color(&mut self.tiles, generation, outcome.to, TileColor::Walker);

        if let StepKind::Flight {
            angle_degrees,
            distance,
        } = outcome.kind
        {
            sink.send(GenerationEvent::Flight {
                from: outcome.from,
                to: outcome.to,
                distance,
                angle_degrees,
            });
        }
        if outcome.newly_filled {
            sink.send(GenerationEvent::CellFilled {
                position: outcome.to,
                filled_count: generation.stepper.filled_count(),
            });
        }

        if generation.stepper.reached(self.target_cells) {
            self.finish(sink);
        }
        Some(outcome)
    }

    fn finish(&mut self, sink: &mut dyn EventSink) {
        if let Some(walker) = self.walker().copied() {
            info!(
                "Walk finished after {} ticks | filled: {}/{}.",
                walker.ticks,
                walker.filled_count,
                self.config.total_cells(),
            );
            sink.send(GenerationEvent::WalkFinished {
                ticks: walker.ticks,
                filled_count: walker.filled_count,
            });
        }

        if self.config.fill_holes_after_completion {
            self.state = SessionState::HoleFilling;
            self.close_holes(self.config.hole_check_strategy, sink);
        }
        self.state = SessionState::Done;
    }

    fn close_holes(&mut self, strategy: HoleCheck, sink: &mut dyn EventSink) -> usize {
        let Some(generation) = self.generation.as_mut() else {
            return 0;
        };
        let filled = fill_holes(&mut generation.grid, strategy);
        for &p in &filled {
            set_color(&mut self.tiles, generation, p, TileColor::Active);
        }
        generation.stepper.add_filled(filled.len());

        info!("Closed {} holes with {:?}.", filled.len(), strategy);
        let count = filled.len();
        sink.send(GenerationEvent::HolesFilled {
            strategy,
            positions: filled,
        });
        count
    }
}

fn set_color<T: TileVisual>(
    tiles: &mut T,
    generation: &Generation<T::Handle>,
    pos: IVec2,
    color: TileColor,
) {
    if let Some(handle) = generation
        .grid
        .index_of(pos.x, pos.y)
        .and_then(|idx| generation.handles.get(idx))
    {
        tiles.set_color(handle, color);
    }
}
