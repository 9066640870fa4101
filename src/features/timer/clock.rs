//! Time sources and the engine's tick subscription.
//!
//! The engine never sleeps. It reads a [`Clock`] and asks its [`Ticker`] how
//! many whole intervals have elapsed since it was armed. Tests drive a
//! [`VirtualClock`] forward instead of waiting on wall-clock time.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the current instant.
    #[must_use]
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

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock.
///
/// Clones share the same time, so a test can keep one handle and hand the
/// other to an engine.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Rc<Cell<Duration>>,
}

impl VirtualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Move time forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    /// Move time forward by milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// The single repeating tick subscription owned by an engine.
///
/// Armed means a tick is scheduled one interval after the arming instant and
/// every interval after that. Disarming drops the schedule; re-arming starts
/// a fresh one, so there is never more than one schedule alive.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Duration>,
    fired: u64,
}

impl Ticker {
    /// Smallest accepted interval.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Create a disarmed ticker.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
            next_due: None,
            fired: 0,
        }
    }

    /// Schedule ticks starting one interval after `now`, replacing any
    /// existing schedule.
    pub fn arm(&mut self, now: Duration) {
        self.next_due = Some(now + self.interval);
    }

    /// Cancel the schedule.
    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Whether a schedule is alive.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next tick is due, if armed.
    #[must_use]
    pub const fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Tick interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks this ticker has delivered.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Consume one due tick.
    ///
    /// Returns true if a tick was due at `now`; the schedule then moves one
    /// interval forward. Callers loop on this so they can stop mid-batch when
    /// a tick disarms the ticker.
    pub fn fire_one(&mut self, now: Duration) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.interval);
                self.fired += 1;
                true
            }
            _ => false,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
