//! File-backed cumulative time ledger.
//!
//! One INI section per scope:
//! - `ALL`: every document, forever
//! - `YYYY-MM-DD`: one work day (see [`crate::day`])
//! - a document path, or `NoFile` for a document that was never saved
//!
//! Each section holds one key per [`InteractionMode`] plus `all`, the scope total.
//! Sections appear on first write and disappear only through [`Ledger::wipe`].
//!
//! # Atomic Writes
//!
//! [`Ledger::flush`] writes a temp file beside the ledger and renames it into
//! place, so a crash mid-write leaves the previous file intact.

mod codec;

pub use codec::{format_seconds, IniDocument, IniSection};

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs_err as fs;
use tempfile::NamedTempFile;

use crate::bucket::BucketSet;
use crate::day::is_day_key;
use crate::error::{Result, WorkHoursError};
use crate::mode::InteractionMode;

/// Section holding totals across every document.
pub const ALL_SCOPE: &str = "ALL";
/// Section for a document that has no path yet.
pub const NO_FILE_SCOPE: &str = "NoFile";
/// Key holding a section's total.
pub const TOTAL_KEY: &str = "all";

/// Identity of the document the host has open.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Maps an absent, empty or all-blank path to `NoFile`. Any other path is kept verbatim.
    pub fn from_path(path: Option<&str>) -> Self {
        match path {
            Some(p) if !p.trim().is_empty() => DocumentKey(p.to_string()),
            _ => DocumentKey(NO_FILE_SCOPE.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unsaved(&self) -> bool {
        self.0 == NO_FILE_SCOPE
    }
}

impl std::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory view of the ledger file, optionally backed by a path.
///
/// Create with [`Ledger::open`] to read an existing file, or
/// [`Ledger::new_in_memory`] for tests.
#[derive(Debug, Clone)]
pub struct Ledger {
    document: IniDocument,
    file_path: Option<PathBuf>,
}

impl Ledger {
    pub fn new_in_memory() -> Self {
        Ledger {
            document: IniDocument::new(),
            file_path: None,
        }
    }

    pub fn new(file_path: &Path) -> Self {
        Ledger {
            document: IniDocument::new(),
            file_path: Some(file_path.to_path_buf()),
        }
    }

    pub fn open(file_path: &Path) -> Result<Self> {
        let mut ledger = Ledger::new(file_path);
        ledger.load()?;
        Ok(ledger)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Replaces the in-memory mapping with the file's contents.
    ///
    /// A missing file loads as an empty ledger. In-memory ledgers keep their contents.
    /// Bytes that are not UTF-8 (paths written under a legacy code page) are
    /// replaced with U+FFFD rather than failing the load.
    pub fn load(&mut self) -> Result<()> {
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        if !file_path.exists() {
            self.document.clear();
            return Ok(());
        }

        let bytes =
            fs::read(file_path).map_err(|e| WorkHoursError::io("Failed to read ledger", e))?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            tracing::warn!(
                path = %file_path.display(),
                "Ledger is not valid UTF-8, undecodable bytes replaced"
            );
        }
        self.document = IniDocument::parse(&content);
        Ok(())
    }

    /// Returns the stored value, or `default` when the scope, key or number is missing.
    pub fn get(&self, scope: &str, key: &str, default: f64) -> f64 {
        self.document
            .get(scope, key)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(default)
    }

    /// Adds `delta` to `mode` and to the total of `scope`, creating either if absent.
    pub fn apply(&mut self, scope: &str, mode: InteractionMode, delta: f64) {
        let mode_seconds = self.get(scope, mode.key(), 0.0) + delta;
        let total_seconds = self.get(scope, TOTAL_KEY, 0.0) + delta;

        let section = self.document.section_mut(scope);
        section.set(mode.key(), format_seconds(mode_seconds));
        section.set(TOTAL_KEY, format_seconds(total_seconds));
    }

    /// Creates `scope` as an empty section if absent. Sections keep creation order in the file.
    pub fn ensure_scope(&mut self, scope: &str) {
        self.document.section_mut(scope);
    }

    /// Makes sure `scope` exists with an explicit total, leaving its value unchanged.
    pub fn touch(&mut self, scope: &str) {
        let total_seconds = self.get(scope, TOTAL_KEY, 0.0);
        self.document
            .set(scope, TOTAL_KEY, format_seconds(total_seconds));
    }

    /// Writes the whole mapping to the backing file. No-op for in-memory ledgers.
    pub fn flush(&self) -> Result<()> {
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        let parent_dir = match file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)
            .map_err(|e| WorkHoursError::io("Failed to create ledger directory", e))?;

        let content = self.document.render();
        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .map_err(|e| WorkHoursError::io("Failed to create temp ledger file", e))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| WorkHoursError::io("Failed to write temp ledger file", e))?;
        temp_file
            .flush()
            .map_err(|e| WorkHoursError::io("Failed to flush temp ledger file", e))?;
        temp_file
            .persist(file_path)
            .map_err(|e| WorkHoursError::io("Failed to replace ledger file", e.error))?;

        tracing::trace!(path = %file_path.display(), bytes = content.len(), "Ledger flushed");
        Ok(())
    }

    /// Deletes the backing file and forgets every scope.
    pub fn wipe(&mut self) -> Result<()> {
        self.document.clear();

        if let Some(file_path) = self.file_path.as_ref() {
            if file_path.exists() {
                fs::remove_file(file_path)
                    .map_err(|e| WorkHoursError::io("Failed to delete ledger", e))?;
            }
            tracing::info!(path = %file_path.display(), "Ledger wiped");
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn bucket(&self, scope: &str, mode: InteractionMode) -> f64 {
        self.get(scope, mode.key(), 0.0)
    }

    pub fn scope_total(&self, scope: &str) -> f64 {
        self.get(scope, TOTAL_KEY, 0.0)
    }

    pub fn bucket_set(&self, scope: &str) -> BucketSet {
        let mut buckets = BucketSet::new();
        for mode in InteractionMode::ALL {
            buckets.set(mode, self.bucket(scope, mode));
        }
        buckets.set_total(self.scope_total(scope));
        buckets
    }

    pub fn contains_scope(&self, scope: &str) -> bool {
        self.document.contains_section(scope)
    }

    /// All section names in file order.
    pub fn scopes(&self) -> Vec<String> {
        self.document.section_names().map(str::to_string).collect()
    }

    /// Work-day scopes, oldest first.
    pub fn day_scopes(&self) -> Vec<String> {
        let mut days: Vec<String> = self
            .document
            .section_names()
            .filter(|name| is_day_key(name))
            .map(str::to_string)
            .collect();
        days.sort();
        days
    }

    /// Document scopes (including `NoFile`) in file order.
    pub fn document_scopes(&self) -> Vec<String> {
        self.document
            .section_names()
            .filter(|name| *name != ALL_SCOPE && !is_day_key(name))
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }
}
