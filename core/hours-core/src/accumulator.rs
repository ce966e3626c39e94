//! In-memory time accounting for the current process and document.
//!
//! Not persisted. Reset on process start and whenever the host loads a
//! document, so it always describes "this sitting".

use crate::bucket::BucketSet;
use crate::mode::InteractionMode;

#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    buckets: BucketSet,
    last_sample_time: f64,
    started_at: f64,
}

impl Accumulator {
    /// Creates a zeroed accumulator whose first delta is measured from `now`.
    pub fn new(now: f64) -> Self {
        Self {
            buckets: BucketSet::new(),
            last_sample_time: now,
            started_at: now,
        }
    }

    /// Zeroes every bucket and restarts the clock at `now`.
    pub fn reset(&mut self, now: f64) {
        *self = Self::new(now);
    }

    pub fn apply(&mut self, mode: InteractionMode, delta: f64) {
        self.buckets.apply(mode, delta);
    }

    /// Zeroes the total only. Used when the clock runs backwards.
    pub fn reset_total(&mut self) {
        self.buckets.set_total(0.0);
    }

    pub fn bucket(&self, mode: InteractionMode) -> f64 {
        self.buckets.get(mode)
    }

    pub fn total(&self) -> f64 {
        self.buckets.total()
    }

    pub fn buckets(&self) -> &BucketSet {
        &self.buckets
    }

    pub fn last_sample_time(&self) -> f64 {
        self.last_sample_time
    }

    pub fn set_last_sample_time(&mut self, now: f64) {
        self.last_sample_time = now;
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Time since the last reset that was not counted as active.
    pub fn away_time(&self, now: f64) -> f64 {
        ((now - self.started_at) - self.total()).max(0.0)
    }
}
