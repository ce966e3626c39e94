//! Host bindings.
//!
//! [`HostSession`] is the object the host's scripting runtime holds for the
//! lifetime of the application. UniFFI objects are shared behind `Arc` and
//! called through `&self`, so the engine sits behind a `Mutex`; the host still
//! calls from its single UI thread.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::config::TrackerConfig;
use crate::engine::WorkHoursEngine;
use crate::error::WorkHoursFfiError;
use crate::mode::InteractionMode;
use crate::storage::StorageConfig;
use crate::tick::TickOutcome;
use crate::types::ScopeSummary;

#[derive(uniffi::Object)]
pub struct HostSession {
    engine: Mutex<WorkHoursEngine>,
}

impl HostSession {
    pub fn from_engine(engine: WorkHoursEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    fn engine(&self) -> MutexGuard<'_, WorkHoursEngine> {
        // A panic mid-tick leaves plain counters behind; keep serving them.
        self.engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[uniffi::export]
impl HostSession {
    /// Opens the ledger in `root`, the directory the host installed the component into.
    #[uniffi::constructor]
    pub fn new(root: String) -> Result<Self, WorkHoursFfiError> {
        let storage = StorageConfig::with_root(PathBuf::from(root));
        let engine = WorkHoursEngine::with_storage(storage)?;
        Ok(Self::from_engine(engine))
    }

    /// Call on every redraw. `mode` is the host's mode label, e.g. `"SCULPT"`.
    ///
    /// Labels outside [`InteractionMode`] return an error and the time since the
    /// previous tick is dropped.
    pub fn tick(
        &self,
        mode: String,
        document_path: Option<String>,
    ) -> Result<TickOutcome, WorkHoursFfiError> {
        let outcome = self.engine().tick_label(&mode, document_path.as_deref())?;
        Ok(outcome)
    }

    pub fn document_loaded(&self) {
        self.engine().document_loaded();
    }

    /// Deletes all records. The host must confirm with the user first.
    pub fn wipe(&self) -> Result<(), WorkHoursFfiError> {
        self.engine().wipe().map_err(WorkHoursFfiError::from)
    }

    pub fn refresh(&self) -> Result<(), WorkHoursFfiError> {
        self.engine().refresh().map_err(WorkHoursFfiError::from)
    }

    pub fn config(&self) -> TrackerConfig {
        self.engine().config()
    }

    pub fn set_config(&self, config: TrackerConfig) -> Result<(), WorkHoursFfiError> {
        self.engine().set_config(config).map_err(WorkHoursFfiError::from)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn session_seconds(&self, mode: InteractionMode) -> f64 {
        self.engine().accumulator_bucket(mode)
    }

    pub fn session_total(&self) -> f64 {
        self.engine().accumulator_total()
    }

    pub fn away_seconds(&self) -> f64 {
        self.engine().away_time()
    }

    pub fn ledger_seconds(&self, scope: String, mode: InteractionMode) -> f64 {
        self.engine().ledger_bucket(&scope, mode)
    }

    pub fn ledger_total(&self, scope: String) -> f64 {
        self.engine().ledger_scope_total(&scope)
    }

    pub fn today_scope(&self) -> String {
        self.engine().today_key()
    }

    pub fn summary(&self, scope: String) -> ScopeSummary {
        self.engine().summary(&scope)
    }

    pub fn session_summary(&self) -> ScopeSummary {
        self.engine().session_summary()
    }

    pub fn day_scopes(&self) -> Vec<String> {
        self.engine().ledger().day_scopes()
    }

    pub fn document_scopes(&self) -> Vec<String> {
        self.engine().ledger().document_scopes()
    }
}
