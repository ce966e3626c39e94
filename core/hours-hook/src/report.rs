//! Read-only reports and the destructive wipe.

use hours_core::{
    format_duration, DocumentKey, Ledger, ScopeSummary, StorageConfig, WorkHoursEngine, ALL_SCOPE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportScope {
    All,
    Today,
    Scope(String),
    Document(String),
}

impl ReportScope {
    pub fn from_args(scope: Option<String>, today: bool, document: Option<String>) -> Self {
        match (scope, today, document) {
            (Some(scope), _, _) => ReportScope::Scope(scope),
            (None, true, _) => ReportScope::Today,
            (None, false, Some(path)) => ReportScope::Document(path),
            (None, false, None) => ReportScope::All,
        }
    }
}

pub fn run_report(storage: StorageConfig, scope: ReportScope) -> Result<(), String> {
    let engine = WorkHoursEngine::with_storage(storage).map_err(String::from)?;
    let scope = match scope {
        ReportScope::All => ALL_SCOPE.to_string(),
        ReportScope::Today => engine.today_key(),
        ReportScope::Scope(scope) => scope,
        ReportScope::Document(path) => DocumentKey::from_path(Some(path.as_str())).to_string(),
    };

    if !engine.ledger().contains_scope(&scope) {
        tracing::info!(scope = %scope, "No records for scope");
    }
    print!("{}", render_summary(&engine.summary(&scope)));
    Ok(())
}

pub fn run_days(storage: StorageConfig) -> Result<(), String> {
    let ledger = Ledger::open(&storage.ledger_file()).map_err(String::from)?;
    print!("{}", render_days(&ledger));
    Ok(())
}

pub fn run_wipe(storage: StorageConfig, confirmed: bool) -> Result<(), String> {
    if !confirmed {
        return Err("Refusing to delete all records without --yes".to_string());
    }

    let mut engine = WorkHoursEngine::with_storage(storage).map_err(String::from)?;
    engine.wipe().map_err(String::from)?;
    println!("Deleted {}", engine.storage().ledger_file().display());
    Ok(())
}

fn render_summary(summary: &ScopeSummary) -> String {
    let mut out = format!("{}\n", summary.scope);
    out.push_str(&format!("  {:<14} {}\n", "TOTAL", summary.total));
    for row in &summary.modes {
        out.push_str(&format!("  {:<14} {}\n", row.mode.label(), row.text));
    }
    out
}

fn render_days(ledger: &Ledger) -> String {
    ledger
        .day_scopes()
        .iter()
        .map(|day| format!("{}  {}\n", day, format_duration(ledger.scope_total(day), false)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hours_core::{BucketSet, InteractionMode};
    use tempfile::tempdir;

    #[test]
    fn scope_flags_resolve_in_priority_order() {
        assert_eq!(ReportScope::from_args(None, false, None), ReportScope::All);
        assert_eq!(ReportScope::from_args(None, true, None), ReportScope::Today);
        assert_eq!(
            ReportScope::from_args(None, false, Some("/a.blend".to_string())),
            ReportScope::Document("/a.blend".to_string())
        );
        assert_eq!(
            ReportScope::from_args(Some("2024-03-15".to_string()), false, None),
            ReportScope::Scope("2024-03-15".to_string())
        );
    }

    #[test]
    fn summary_renders_total_and_every_mode() {
        let mut buckets = BucketSet::new();
        buckets.apply(InteractionMode::Sculpt, 8130.0);
        let text = render_summary(&ScopeSummary::from_buckets("ALL", &buckets));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ALL");
        assert_eq!(lines[1], "  TOTAL          2h15m30s");
        assert_eq!(lines.len(), 2 + InteractionMode::COUNT);
        assert!(lines.contains(&"  SCULPT         2h15m30s"));
        assert!(lines.contains(&"  OBJECT         ..."));
    }

    #[test]
    fn days_are_listed_oldest_first() {
        let mut ledger = Ledger::new_in_memory();
        ledger.apply("2024-03-16", InteractionMode::Object, 90.0);
        ledger.apply("2024-03-15", InteractionMode::Object, 30.0);
        ledger.apply(ALL_SCOPE, InteractionMode::Object, 120.0);

        assert_eq!(render_days(&ledger), "2024-03-15  30s\n2024-03-16  1m30s\n");
    }

    #[test]
    fn wipe_requires_confirmation() {
        let temp = tempdir().unwrap();
        let storage = StorageConfig::with_root(temp.path().to_path_buf());
        std::fs::write(storage.ledger_file(), "[ALL]\nall = 1.0\n").unwrap();

        assert!(run_wipe(storage.clone(), false).is_err());
        assert!(storage.ledger_file().exists());

        run_wipe(storage.clone(), true).unwrap();
        assert!(!storage.ledger_file().exists());
    }
}
