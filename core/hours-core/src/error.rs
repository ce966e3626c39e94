//! Error types for hours-core operations.
//! Keep WorkHoursFfiError minimal and stable to avoid breaking host bindings.

use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// FFI-Compatible Error (for the host scripting runtime)
// ═══════════════════════════════════════════════════════════════════════════════

/// FFI-safe error type for use across language boundaries.
///
/// Carries only a message string so UniFFI can map it onto a plain exception.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum WorkHoursFfiError {
    #[error("{message}")]
    General { message: String },
}

impl From<String> for WorkHoursFfiError {
    fn from(message: String) -> Self {
        WorkHoursFfiError::General { message }
    }
}

impl From<&str> for WorkHoursFfiError {
    fn from(message: &str) -> Self {
        WorkHoursFfiError::General {
            message: message.to_string(),
        }
    }
}

impl From<WorkHoursError> for WorkHoursFfiError {
    fn from(err: WorkHoursError) -> Self {
        WorkHoursFfiError::General {
            message: err.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Internal Error (for Rust-only use)
// ═══════════════════════════════════════════════════════════════════════════════

/// All errors that can occur in hours-core operations.
///
/// Missing ledger files and missing keys are not errors; they read as zero.
#[derive(Debug, thiserror::Error)]
pub enum WorkHoursError {
    // ─────────────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Unknown interaction mode: {0}")]
    UnknownMode(String),

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration value out of range: {field} = {value} (expected {expected})")]
    ConfigOutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    // ─────────────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WorkHoursError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        WorkHoursError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using WorkHoursError.
pub type Result<T> = std::result::Result<T, WorkHoursError>;

impl From<WorkHoursError> for String {
    fn from(err: WorkHoursError) -> String {
        err.to_string()
    }
}
