//! Per-mode seconds counters with an independently stored total.

use crate::mode::InteractionMode;

/// Seconds accumulated per [`InteractionMode`], plus a scope total.
///
/// `total` is written alongside the mode bucket on every delta and is never
/// recomputed from the mode values, so a hand-edited ledger row can carry a
/// total that differs from the sum of its modes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BucketSet {
    modes: [f64; InteractionMode::COUNT],
    total: f64,
}

impl BucketSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mode: InteractionMode) -> f64 {
        self.modes[mode.index()]
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Adds `delta` to exactly one mode bucket and to the total.
    pub fn apply(&mut self, mode: InteractionMode, delta: f64) {
        self.modes[mode.index()] += delta;
        self.total += delta;
    }

    pub fn set(&mut self, mode: InteractionMode, seconds: f64) {
        self.modes[mode.index()] = seconds;
    }

    pub fn set_total(&mut self, seconds: f64) {
        self.total = seconds;
    }

    /// Yields `(mode, seconds)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (InteractionMode, f64)> + '_ {
        InteractionMode::ALL
            .into_iter()
            .map(move |mode| (mode, self.get(mode)))
    }
}
