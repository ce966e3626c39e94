//! The tick handler: one host redraw in, attributed seconds out.
//!
//! ## State Machine
//!
//! ```text
//! delta = now - last_sample_time
//! delta < 0                  → clamp to 0, zero the session total (clock regressed)
//! delta >= ignore interval   → discard (user was away / UI was not drawing)
//! otherwise                  → add to session, ALL, today, and document buckets
//! always                     → last_sample_time = second clock read; rewrite ledger
//! ```
//!
//! The ledger is reloaded from disk at the start of every tick and rewritten at
//! the end, even when the delta was discarded.

use crate::accumulator::Accumulator;
use crate::clock::TimeSource;
use crate::config::TrackerConfig;
use crate::day::day_key;
use crate::error::Result;
use crate::ledger::{DocumentKey, Ledger, ALL_SCOPE};
use crate::mode::InteractionMode;

/// What a tick did with its delta.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Enum)]
pub enum TickOutcome {
    /// `delta` seconds were credited to the mode.
    Recorded { delta: f64 },
    /// The gap since the previous tick was too long and was dropped.
    Idle { gap: f64 },
    /// The clock ran backwards; nothing was credited and the session total was zeroed.
    ClockRegressed,
}

/// Processes one tick.
///
/// The accumulator is always updated, even when the ledger cannot be read or
/// written; a storage error only costs this tick's durability.
pub fn handle_tick<C: TimeSource + ?Sized>(
    accumulator: &mut Accumulator,
    ledger: &mut Ledger,
    clock: &C,
    mode: InteractionMode,
    document: &DocumentKey,
    config: &TrackerConfig,
) -> Result<TickOutcome> {
    let now = clock.monotonic();
    let day = day_key(clock.wall_time().naive_local(), config.reset_hour);

    let mut delta = now - accumulator.last_sample_time();
    let mut outcome = TickOutcome::Recorded { delta };
    if delta < 0.0 {
        tracing::warn!(
            now,
            last_sample_time = accumulator.last_sample_time(),
            "Clock regressed, resetting session total"
        );
        delta = 0.0;
        accumulator.reset_total();
        outcome = TickOutcome::ClockRegressed;
    }

    let credited = if delta < config.ignore_time_interval {
        accumulator.apply(mode, delta);
        Some(delta)
    } else {
        tracing::debug!(gap = delta, %mode, "Gap exceeds ignore interval, not counted");
        outcome = TickOutcome::Idle { gap: delta };
        None
    };

    let persisted = record_in_ledger(ledger, mode, document, &day, credited);

    accumulator.set_last_sample_time(clock.monotonic());

    persisted?;
    Ok(outcome)
}

fn record_in_ledger(
    ledger: &mut Ledger,
    mode: InteractionMode,
    document: &DocumentKey,
    day: &str,
    credited: Option<f64>,
) -> Result<()> {
    ledger.load()?;

    // New sections are appended: document first, then ALL, then the day.
    ledger.ensure_scope(document.as_str());
    ledger.ensure_scope(ALL_SCOPE);
    if let Some(delta) = credited {
        ledger.apply(document.as_str(), mode, delta);
        ledger.apply(ALL_SCOPE, mode, delta);
        ledger.apply(day, mode, delta);
    }
    ledger.touch(ALL_SCOPE);
    ledger.touch(document.as_str());

    ledger.flush()
}
