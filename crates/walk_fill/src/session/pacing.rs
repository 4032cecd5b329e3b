//! Wall-clock pacing for walk ticks.
//!
//! A [`TickScheduler`] enforces a lower bound of `1 / ticks_per_second` seconds between two
//! ticks, measured from when the previous tick actually ran. Late ticks never trigger a
//! catch-up burst. Time comes from a [`PacingClock`], so tests can swap in a [`ManualClock`]
//! that jumps straight to every deadline.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Source of elapsed time in seconds.
pub trait PacingClock {
    /// Seconds since an arbitrary fixed origin.
    fn now(&mut self) -> f64;

    /// Blocks until `now() >= deadline`.
    fn sleep_until(&mut self, deadline: f64);
}

/// Real time, measured from construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PacingClock for SystemClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep_until(&mut self, deadline: f64) {
        let remaining = deadline - self.now();
        if remaining > 0.0 {
            thread::sleep(Duration::from_secs_f64(remaining));
        }
    }
}

/// Simulated time that only moves when told to.
///
/// `sleep_until` jumps to the deadline immediately and counts the suspension.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f64,
    sleeps: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `seconds`.
    pub fn advance(&mut self, seconds: f64) {
        self.now += seconds.max(0.0);
    }

    /// Number of times a caller suspended on this clock.
    pub fn sleeps(&self) -> usize {
        self.sleeps
    }
}

impl PacingClock for ManualClock {
    fn now(&mut self) -> f64 {
        self.now
    }

    fn sleep_until(&mut self, deadline: f64) {
        self.sleeps += 1;
        if deadline > self.now {
            self.now = deadline;
        }
    }
}

/// Decides when the next tick may run.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: f64,
    last_tick: Option<f64>,
}

impl TickScheduler {
    pub fn new(ticks_per_second: f64) -> Self {
        debug_assert!(ticks_per_second > 0.0, "ticks_per_second must be > 0");
        Self {
            interval: 1.0 / ticks_per_second,
            last_tick: None,
        }
    }

    /// Minimum spacing between ticks in seconds.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Earliest time the next tick may run, or `None` if it may run right away.
    pub fn next_due(&self) -> Option<f64> {
        self.last_tick.map(|t| t + self.interval)
    }

    pub fn is_due(&self, now: f64) -> bool {
        self.next_due().is_none_or(|due| now >= due)
    }

    /// Records that a tick ran at `now`.
    pub fn record_tick(&mut self, now: f64) {
        self.last_tick = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

/// Cooperative stop flag shared between a running session and its controller.
///
/// Raising it makes paced run loops return at their next suspension point; a tick in progress
/// always completes.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_due_immediately() {
        let scheduler = TickScheduler::new(10.0);
        assert!(scheduler.next_due().is_none());
        assert!(scheduler.is_due(0.0));
    }

    #[test]
    fn spacing_is_measured_from_actual_tick() {
        let mut scheduler = TickScheduler::new(4.0);
        scheduler.record_tick(1.0);
        assert!(!scheduler.is_due(1.2));
        assert!(scheduler.is_due(1.25));

        // A late tick pushes the next deadline out instead of allowing a burst.
        scheduler.record_tick(3.0);
        assert!(!scheduler.is_due(3.1));
        assert_eq!(scheduler.next_due(), Some(3.25));
    }

    #[test]
    fn reset_clears_last_tick() {
        let mut scheduler = TickScheduler::new(1.0);
        scheduler.record_tick(5.0);
        scheduler.reset();
        assert!(scheduler.is_due(0.0));
    }

    #[test]
    fn manual_clock_jumps_to_deadline() {
        let mut clock = ManualClock::new();
        clock.advance(1.5);
        assert_eq!(clock.now(), 1.5);
        clock.sleep_until(4.0);
        assert_eq!(clock.now(), 4.0);
        clock.sleep_until(2.0);
        assert_eq!(clock.now(), 4.0);
        assert_eq!(clock.sleeps(), 2);
    }

    #[test]
    fn system_clock_waits_at_least_until_deadline() {
        let mut clock = SystemClock::new();
        let deadline = clock.now() + 0.01;
        clock.sleep_until(deadline);
        assert!(clock.now() >= deadline);
    }

    #[test]
    fn stop_signal_is_shared_between_clones() {
        let signal = StopSignal::new();
        let other = signal.clone();
        assert!(!signal.is_raised());
        other.raise();
        assert!(signal.is_raised());
        signal.reset();
        assert!(!other.is_raised());
    }
}
