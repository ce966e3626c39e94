//! WorkHoursEngine - the entry point for embedding Working Hours in a host.
//!
//! Owns the session [`Accumulator`], the [`Ledger`], the preferences and the
//! clock, and wires host events to them:
//!
//! - every redraw → [`WorkHoursEngine::tick`]
//! - a document was opened → [`WorkHoursEngine::document_loaded`]
//! - the user confirmed "delete all records" → [`WorkHoursEngine::wipe`]
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use hours_core::{InteractionMode, WorkHoursEngine};
//!
//! let mut engine = WorkHoursEngine::new()?;
//! engine.tick(InteractionMode::Object, None)?;
//! let today = engine.summary(&engine.today_key());
//! ```

use crate::accumulator::Accumulator;
use crate::clock::{SystemClock, TimeSource};
use crate::config::{load_tracker_config, save_tracker_config, TrackerConfig};
use crate::day::day_key;
use crate::error::Result;
use crate::ledger::{DocumentKey, Ledger};
use crate::mode::InteractionMode;
use crate::storage::StorageConfig;
use crate::tick::{handle_tick, TickOutcome};
use crate::types::ScopeSummary;

pub struct WorkHoursEngine<C: TimeSource = SystemClock> {
    storage: StorageConfig,
    clock: C,
    config: TrackerConfig,
    accumulator: Accumulator,
    ledger: Ledger,
}

impl WorkHoursEngine<SystemClock> {
    /// Engine with default storage (beside the running executable).
    pub fn new() -> Result<Self> {
        Self::with_storage(StorageConfig::default())
    }

    pub fn with_storage(storage: StorageConfig) -> Result<Self> {
        Self::with_clock(storage, SystemClock::new())
    }
}

impl<C: TimeSource> WorkHoursEngine<C> {
    /// Engine driven by an explicit clock. Used for tests and replays.
    pub fn with_clock(storage: StorageConfig, clock: C) -> Result<Self> {
        let config = load_tracker_config(&storage);
        let ledger_file = storage.ledger_file();
        // Every tick reloads the file, so an unreadable ledger only costs persistence.
        let ledger = match Ledger::open(&ledger_file) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!(
                    path = %ledger_file.display(),
                    error = %e,
                    "Ledger unreadable, starting with an empty view"
                );
                Ledger::new(&ledger_file)
            }
        };
        let accumulator = Accumulator::new(clock.monotonic());

        tracing::debug!(
            root = %storage.root().display(),
            ignore_time_interval = config.ignore_time_interval,
            reset_hour = config.reset_hour,
            "Engine ready"
        );

        Ok(Self {
            storage,
            clock,
            config,
            accumulator,
            ledger,
        })
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Host events
    // ─────────────────────────────────────────────────────────────────────────────

    /// Handles one redraw tick. `document` is the open file's path, `None` if unsaved.
    pub fn tick(&mut self, mode: InteractionMode, document: Option<&str>) -> Result<TickOutcome> {
        let document = DocumentKey::from_path(document);
        handle_tick(
            &mut self.accumulator,
            &mut self.ledger,
            &self.clock,
            mode,
            &document,
            &self.config,
        )
    }

    /// Handles a tick whose mode arrives as the host's label, e.g. `"SCULPT"`.
    ///
    /// An unknown label drops the gap since the previous tick, so that time is
    /// never credited to whichever known mode comes next.
    pub fn tick_label(&mut self, label: &str, document: Option<&str>) -> Result<TickOutcome> {
        match label.parse::<InteractionMode>() {
            Ok(mode) => self.tick(mode, document),
            Err(e) => {
                tracing::debug!(label, "Unknown mode, gap discarded");
                self.skip_gap();
                Err(e)
            }
        }
    }

    /// Moves the sample point to now without crediting anything.
    pub fn skip_gap(&mut self) {
        self.accumulator.set_last_sample_time(self.clock.monotonic());
    }

    /// Zeroes the session counters and measures the next delta from now.
    pub fn start_session(&mut self) {
        self.accumulator.reset(self.clock.monotonic());
    }

    /// Starts a fresh session after the host opened a document.
    pub fn document_loaded(&mut self) {
        self.start_session();
        tracing::info!("Document loaded, session counters reset");
    }

    /// Deletes every persisted record and resets the session.
    pub fn wipe(&mut self) -> Result<()> {
        self.ledger.wipe()?;
        self.accumulator.reset(self.clock.monotonic());
        Ok(())
    }

    /// Re-reads the ledger from disk, picking up writes from other processes.
    pub fn refresh(&mut self) -> Result<()> {
        self.ledger.load()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    /// Validates, persists and applies new preferences.
    pub fn set_config(&mut self, config: TrackerConfig) -> Result<()> {
        save_tracker_config(&self.storage, &config)?;
        self.config = config;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn accumulator_bucket(&self, mode: InteractionMode) -> f64 {
        self.accumulator.bucket(mode)
    }

    pub fn accumulator_total(&self) -> f64 {
        self.accumulator.total()
    }

    /// Seconds since the session started that were not counted as active.
    pub fn away_time(&self) -> f64 {
        self.accumulator.away_time(self.clock.monotonic())
    }

    pub fn ledger_bucket(&self, scope: &str, mode: InteractionMode) -> f64 {
        self.ledger.bucket(scope, mode)
    }

    pub fn ledger_scope_total(&self, scope: &str) -> f64 {
        self.ledger.scope_total(scope)
    }

    /// Ledger scope for the current work day.
    pub fn today_key(&self) -> String {
        day_key(self.clock.wall_time().naive_local(), self.config.reset_hour)
    }

    pub fn summary(&self, scope: &str) -> ScopeSummary {
        ScopeSummary::from_buckets(scope, &self.ledger.bucket_set(scope))
    }

    /// Summary of the in-memory session, labelled `session`.
    pub fn session_summary(&self) -> ScopeSummary {
        ScopeSummary::from_buckets("session", self.accumulator.buckets())
    }
}
