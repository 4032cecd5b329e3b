//! Event types and sinks for observing generation sessions.
//!
//! Every `*_with_events` method on [`crate::session::GenerationSession`] forwards
//! [`GenerationEvent`]s to an [`EventSink`]. The plain methods use the no-op `()` sink.
use glam::IVec2;

use crate::holes::HoleCheck;

/// Describes events emitted while a session runs.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// Emitted when `generate` allocated the grid and tiles.
    Started {
        /// Grid dimensions (width, height).
        size: (u32, u32),
        /// Filled cells needed to finish the walk.
        target_cells: usize,
        /// Seed of both streams, if a fixed seed is used.
        seed: Option<u64>,
    },

    /// Emitted when a cell becomes filled by the walker.
    CellFilled {
        position: IVec2,
        /// Filled cells after this one.
        filled_count: usize,
    },

    /// Emitted when the walker takes a flight.
    Flight {
        from: IVec2,
        /// Landing cell after clamping.
        to: IVec2,
        distance: i32,
        angle_degrees: f64,
    },

    /// Emitted once the walk reached its target.
    WalkFinished {
        /// Ticks taken, including the initial placement.
        ticks: u64,
        filled_count: usize,
    },

    /// Emitted after a hole-closing pass.
    HolesFilled {
        strategy: HoleCheck,
        /// Cells closed by this pass.
        positions: Vec<IVec2>,
    },

    /// Emitted when the session released its grid and tiles.
    Cleared,
}

/// Receives [`GenerationEvent`]s from a session.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);
}

/// Discards every event.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}
}

/// Calls the wrapped closure for every event.
///
/// Useful for reacting to progress mid-run, e.g. raising a
/// [`StopSignal`](crate::session::pacing::StopSignal) after some cell count.
pub struct FnSink<F>(pub F);

impl<F: FnMut(GenerationEvent)> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(GenerationEvent)> EventSink for FnSink<F> {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.0)(event);
    }
}

/// Records every event of a session, in order, with queries over the walk.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GenerationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<GenerationEvent> {
        self.events
    }

    /// Cells in the order the walker filled them.
    pub fn filled_cells(&self) -> Vec<IVec2> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GenerationEvent::CellFilled { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// Number of flights taken since recording started.
    pub fn flight_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GenerationEvent::Flight { .. }))
            .count()
    }

    /// Cells closed by the most recent hole-closing pass, if one ran.
    pub fn closed_holes(&self) -> Option<&[IVec2]> {
        self.events.iter().rev().find_map(|e| match e {
            GenerationEvent::HolesFilled { positions, .. } => Some(positions.as_slice()),
            _ => None,
        })
    }
}

impl EventSink for EventLog {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        self.events.push(event);
    }
}
