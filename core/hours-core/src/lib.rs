//! # hours-core
//!
//! Core library for Working Hours: converts the periodic redraw ticks of a host
//! 3D application into active-use time, bucketed by interaction mode and
//! persisted per document, per work day, and across all documents.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime, no background threads. The host's redraw
//!   callback drives everything.
//! - **Not thread-safe**: Callers own the [`Accumulator`] and [`Ledger`] and
//!   serialize access. [`HostSession`] adds a `Mutex` only for the binding layer.
//! - **Graceful degradation**: Missing files and keys read as zero, storage
//!   failures come back as errors and never panic the host.
//! - **FFI-ready**: UniFFI annotations expose [`HostSession`] to the host's
//!   scripting runtime.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hours_core::{InteractionMode, WorkHoursEngine};
//!
//! let mut engine = WorkHoursEngine::new()?;
//! engine.tick(InteractionMode::Sculpt, Some("/projects/robot.blend"))?;
//! println!("{}", engine.summary("ALL").total);
//! ```

// UniFFI scaffolding for host bindings
uniffi::setup_scaffolding!();

pub mod accumulator;
pub mod bucket;
pub mod clock;
pub mod config;
pub mod day;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod format;
pub mod ledger;
pub mod mode;
pub mod patterns;
pub mod storage;
pub mod tick;
pub mod types;

pub use accumulator::Accumulator;
pub use bucket::BucketSet;
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use config::{load_tracker_config, read_tracker_config, save_tracker_config, TrackerConfig};
pub use day::day_key;
pub use engine::WorkHoursEngine;
pub use error::{Result, WorkHoursError, WorkHoursFfiError};
pub use ffi::HostSession;
pub use format::format_duration;
pub use ledger::{DocumentKey, Ledger, ALL_SCOPE, NO_FILE_SCOPE, TOTAL_KEY};
pub use mode::InteractionMode;
pub use storage::StorageConfig;
pub use tick::{handle_tick, TickOutcome};
pub use types::{ModeDuration, ScopeSummary};
