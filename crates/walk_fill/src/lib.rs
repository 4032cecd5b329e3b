#![forbid(unsafe_code)]
//! walk_fill: Paced random-walk fill of a 2D grid with flights and hole closing.
//!
//! Modules:
//! - grid: fixed-size fill grid with bounds checks and clamping
//! - random: walk and flight random streams
//! - walk: the stepping walker (cardinal steps and flights)
//! - holes: post-process hole closing (Cardinal4, Full8, Diagonal4)
//! - config: generation configuration and validation
//! - session: lifecycle, pacing, tile collaborators, events
pub mod config;
pub mod error;
pub mod grid;
pub mod holes;
pub mod random;
pub mod session;
pub mod walk;

/// Convenient re-exports for common types. Import with `use walk_fill::prelude::*;`.
pub mod prelude {
    pub use crate::config::GenerationConfig;
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Cell, Grid};
    pub use crate::holes::{fill_holes, HoleCheck};
    pub use crate::random::{Direction, RandomSource};
    pub use crate::session::events::{EventLog, EventSink, FnSink, GenerationEvent};
    pub use crate::session::pacing::{
        ManualClock, PacingClock, StopSignal, SystemClock, TickScheduler,
    };
    pub use crate::session::tiles::{ColorBuffer, TileColor, TileId, TilePlacement, TileVisual};
    pub use crate::session::{GenerationSession, SessionState};
    pub use crate::walk::{flight_landing, StepKind, StepOutcome, WalkStepper, WalkerState};
}
