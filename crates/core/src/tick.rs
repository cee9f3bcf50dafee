//! Tick sources - the gravity drivers a session starts and stops
//!
//! The session never sleeps or spawns timers itself. It only tells its tick
//! source to start (on `start`) and stop (on game over or explicit stop); the
//! host decides when to call `Session::on_tick`.

use std::time::{Duration, Instant};

/// A stoppable, restartable source of gravity ticks.
///
/// `stop` must be idempotent: calling it on a stopped source does nothing.
pub trait TickSource {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Tick source driven by hand (tests, replays, scripted harnesses).
///
/// Counts effective starts and stops so callers can verify the session's
/// lifecycle handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTicker {
    running: bool,
    starts: u32,
    stops: u32,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Number of stops that actually stopped a running source.
    pub fn stops(&self) -> u32 {
        self.stops
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Wall-clock tick source polled by a host loop.
///
/// ```
/// use std::time::{Duration, Instant};
/// use tui_blocks_core::tick::{IntervalTicker, TickSource};
///
/// let mut ticker = IntervalTicker::from_millis(1000);
/// let t0 = Instant::now();
/// ticker.start_at(t0);
/// assert!(!ticker.due(t0 + Duration::from_millis(999)));
/// assert!(ticker.due(t0 + Duration::from_millis(1000)));
/// ```
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start with the first tick one interval after `now`.
    pub fn start_at(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Consume a due tick.
    ///
    /// Returns true at most once per call. A host that fell behind gets one
    /// tick and the schedule restarts from `now` rather than bursting.
    pub fn due(&mut self, now: Instant) -> bool {
        let Some(at) = self.next_due else {
            return false;
        };
        if now < at {
            return false;
        }

        let mut next = at + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_due = Some(next);
        true
    }

    /// Time left until the next tick, `None` while stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|at| at.saturating_duration_since(now))
    }
}

impl TickSource for IntervalTicker {
    fn start(&mut self) {
        self.start_at(Instant::now());
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn is_running(&self) -> bool {
        self.next_due.is_some()
    }
}
