//! Time sources for the tick handler.
//!
//! A tick needs two readings: a monotonic timestamp for deltas and a local
//! wall-clock time for the day key. Production uses [`SystemClock`]; tests and
//! replays of recorded samples use [`ManualClock`].

use std::cell::Cell;
use std::time::Instant;

use chrono::{DateTime, Duration, Local};

pub trait TimeSource {
    /// Seconds since an arbitrary fixed origin. Never goes backwards on a healthy system.
    fn monotonic(&self) -> f64;

    /// Current local wall-clock time.
    fn wall_time(&self) -> DateTime<Local>;
}

/// Monotonic seconds measured from construction, wall time from the OS.
#[derive(Debug, Clone, Copy)]
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

impl TimeSource for SystemClock {
    fn monotonic(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn wall_time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// Both readings move together under [`ManualClock::advance`]; [`ManualClock::set`]
/// positions them independently, e.g. to simulate a monotonic clock reset.
#[derive(Debug, Clone)]
pub struct ManualClock {
    monotonic: Cell<f64>,
    wall_time: Cell<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(monotonic: f64, wall_time: DateTime<Local>) -> Self {
        Self {
            monotonic: Cell::new(monotonic),
            wall_time: Cell::new(wall_time),
        }
    }

    /// Moves both readings forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.monotonic.set(self.monotonic.get() + seconds);
        let millis = (seconds * 1000.0).round() as i64;
        let wall = self.wall_time.get();
        self.wall_time.set(
            wall.checked_add_signed(Duration::milliseconds(millis))
                .unwrap_or(wall),
        );
    }

    pub fn set(&self, monotonic: f64, wall_time: DateTime<Local>) {
        self.monotonic.set(monotonic);
        self.wall_time.set(wall_time);
    }

    pub fn set_monotonic(&self, monotonic: f64) {
        self.monotonic.set(monotonic);
    }
}

impl TimeSource for ManualClock {
    fn monotonic(&self) -> f64 {
        self.monotonic.get()
    }

    fn wall_time(&self) -> DateTime<Local> {
        self.wall_time.get()
    }
}
