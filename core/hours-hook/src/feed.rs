//! Tick feed: one JSON event per stdin line.
//!
//! ```text
//! {"event":"tick","mode":"SCULPT","document":"/projects/robot.blend"}
//! {"event":"tick","mode":"OBJECT"}                         ← unsaved document
//! {"event":"document_loaded"}
//! ```
//!
//! With `--replay`, each event may also carry `timestamp` (monotonic seconds)
//! and `wall_time` (RFC 3339) and the clock follows them, so recorded sessions
//! can be re-accounted deterministically.
//!
//! Malformed lines and storage failures are logged and skipped; the feed only
//! stops at end of input. A tick with a mode label this build does not know
//! still advances the clock, and its gap is dropped.

use std::io::{self, BufRead};

use chrono::{DateTime, Local};
use hours_core::{
    ManualClock, StorageConfig, TickOutcome, TimeSource, WorkHoursEngine, WorkHoursError,
};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FeedEvent {
    Tick {
        mode: String,
        #[serde(default)]
        document: Option<String>,
        #[serde(default)]
        timestamp: Option<f64>,
        #[serde(default)]
        wall_time: Option<DateTime<Local>>,
    },
    DocumentLoaded {
        #[serde(default)]
        timestamp: Option<f64>,
        #[serde(default)]
        wall_time: Option<DateTime<Local>>,
    },
}

impl FeedEvent {
    fn timing(&self) -> (Option<f64>, Option<DateTime<Local>>) {
        match self {
            FeedEvent::Tick {
                timestamp,
                wall_time,
                ..
            }
            | FeedEvent::DocumentLoaded {
                timestamp,
                wall_time,
            } => (*timestamp, *wall_time),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    pub recorded: u64,
    pub idle: u64,
    pub regressed: u64,
    pub unknown_mode: u64,
    pub failed: u64,
    pub skipped: u64,
}

pub fn run(storage: StorageConfig, replay: bool) -> Result<FeedStats, String> {
    let stdin = io::stdin();
    if replay {
        let clock = ManualClock::new(0.0, Local::now());
        let mut engine = WorkHoursEngine::with_clock(storage, clock).map_err(String::from)?;
        feed(&mut engine, stdin.lock(), follow_event_clock)
    } else {
        let mut engine = WorkHoursEngine::with_storage(storage).map_err(String::from)?;
        feed(&mut engine, stdin.lock(), |_, _| {})
    }
}

/// Moves a replay clock to the event's recorded time.
fn follow_event_clock(clock: &ManualClock, event: &FeedEvent) {
    let (timestamp, wall_time) = event.timing();
    if let Some(timestamp) = timestamp {
        clock.advance(timestamp - clock.monotonic());
    }
    if let Some(wall_time) = wall_time {
        clock.set(clock.monotonic(), wall_time);
    }
}

fn feed<C, R, F>(
    engine: &mut WorkHoursEngine<C>,
    reader: R,
    sync_clock: F,
) -> Result<FeedStats, String>
where
    C: TimeSource,
    R: BufRead,
    F: Fn(&C, &FeedEvent),
{
    let mut stats = FeedStats::default();
    let mut started = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read stdin: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }

        let event: FeedEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping malformed event");
                stats.skipped += 1;
                continue;
            }
        };

        sync_clock(engine.clock(), &event);
        if !started {
            engine.start_session();
            started = true;
        }

        match event {
            FeedEvent::Tick { mode, document, .. } => {
                match engine.tick_label(&mode, document.as_deref()) {
                    Ok(TickOutcome::Recorded { .. }) => stats.recorded += 1,
                    Ok(TickOutcome::Idle { .. }) => stats.idle += 1,
                    Ok(TickOutcome::ClockRegressed) => stats.regressed += 1,
                    Err(WorkHoursError::UnknownMode(label)) => {
                        tracing::debug!(line = index + 1, %label, "Unknown mode, gap dropped");
                        stats.unknown_mode += 1;
                    }
                    Err(e) => {
                        tracing::warn!(line = index + 1, error = %e, "Tick not persisted");
                        stats.failed += 1;
                    }
                }
            }
            FeedEvent::DocumentLoaded { .. } => engine.document_loaded(),
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hours_core::{InteractionMode, ALL_SCOPE, NO_FILE_SCOPE};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn replay_engine(root: &std::path::Path) -> WorkHoursEngine<ManualClock> {
        WorkHoursEngine::with_clock(
            StorageConfig::with_root(root.to_path_buf()),
            ManualClock::new(0.0, Local::now()),
        )
        .unwrap()
    }

    #[test]
    fn parses_tick_and_document_events() {
        let tick: FeedEvent =
            serde_json::from_str(r#"{"event":"tick","mode":"EDIT_MESH","document":"/a.blend"}"#)
                .unwrap();
        assert_eq!(
            tick,
            FeedEvent::Tick {
                mode: "EDIT_MESH".to_string(),
                document: Some("/a.blend".to_string()),
                timestamp: None,
                wall_time: None,
            }
        );

        let loaded: FeedEvent =
            serde_json::from_str(r#"{"event":"document_loaded","timestamp":12.5}"#).unwrap();
        assert_eq!(loaded.timing().0, Some(12.5));
    }

    #[test]
    fn replay_accounts_recorded_session() {
        let temp = tempdir().unwrap();
        let mut engine = replay_engine(temp.path());
        let input = [
            r#"{"event":"tick","mode":"OBJECT","timestamp":1000.0}"#,
            r#"{"event":"tick","mode":"OBJECT","timestamp":1010.0}"#,
            r#"{"event":"tick","mode":"OBJECT","timestamp":1100.0}"#,
            r#"{"event":"tick","mode":"SCULPT","timestamp":1105.0}"#,
        ]
        .join("\n");

        let stats = feed(&mut engine, Cursor::new(input), follow_event_clock).unwrap();

        assert_eq!(stats.recorded, 3);
        assert_eq!(stats.idle, 1);
        assert_eq!(engine.accumulator_total(), 15.0);
        assert_eq!(engine.ledger_bucket(NO_FILE_SCOPE, InteractionMode::Sculpt), 5.0);
        assert_eq!(engine.ledger_scope_total(ALL_SCOPE), 15.0);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let temp = tempdir().unwrap();
        let mut engine = replay_engine(temp.path());
        let input = [
            "not json",
            r#"{"event":"tick","mode":"EDIT_GPENCIL","timestamp":1.0}"#,
            "",
            r#"{"event":"tick","mode":"POSE","timestamp":2.0}"#,
            r#"{"event":"tick","mode":"POSE","timestamp":4.0}"#,
        ]
        .join("\n");

        let stats = feed(&mut engine, Cursor::new(input), follow_event_clock).unwrap();

        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.unknown_mode, 1);
        assert_eq!(stats.recorded, 2);
        assert_eq!(engine.accumulator_bucket(InteractionMode::Pose), 3.0);
    }

    #[test]
    fn unknown_mode_ticks_are_not_charged_to_the_next_mode() {
        let temp = tempdir().unwrap();
        let mut engine = replay_engine(temp.path());
        let mut lines = vec![r#"{"event":"tick","mode":"OBJECT","timestamp":0.0}"#.to_string()];
        for second in 1..=40 {
            lines.push(format!(
                r#"{{"event":"tick","mode":"EDIT_GPENCIL","timestamp":{second}.0}}"#
            ));
        }
        lines.push(r#"{"event":"tick","mode":"SCULPT","timestamp":41.0}"#.to_string());

        let stats = feed(&mut engine, Cursor::new(lines.join("\n")), follow_event_clock).unwrap();

        assert_eq!(stats.unknown_mode, 40);
        assert_eq!(stats.recorded, 2);
        assert_eq!(engine.accumulator_bucket(InteractionMode::Sculpt), 1.0);
        assert_eq!(engine.accumulator_total(), 1.0);
        assert_eq!(engine.ledger_bucket(NO_FILE_SCOPE, InteractionMode::Sculpt), 1.0);
    }

    #[test]
    fn document_loaded_resets_session() {
        let temp = tempdir().unwrap();
        let mut engine = replay_engine(temp.path());
        let input = [
            r#"{"event":"tick","mode":"OBJECT","timestamp":0.0}"#,
            r#"{"event":"tick","mode":"OBJECT","timestamp":20.0}"#,
            r#"{"event":"document_loaded","timestamp":21.0}"#,
            r#"{"event":"tick","mode":"POSE","document":"/a.doc","timestamp":25.0}"#,
        ]
        .join("\n");

        feed(&mut engine, Cursor::new(input), follow_event_clock).unwrap();

        assert_eq!(engine.accumulator_total(), 4.0);
        assert_eq!(engine.ledger_scope_total(NO_FILE_SCOPE), 20.0);
        assert_eq!(engine.ledger_scope_total("/a.doc"), 4.0);
    }

    #[test]
    fn timestamp_going_backwards_is_counted_as_regression() {
        let temp = tempdir().unwrap();
        let mut engine = replay_engine(temp.path());
        let input = [
            r#"{"event":"tick","mode":"OBJECT","timestamp":50.0}"#,
            r#"{"event":"tick","mode":"OBJECT","timestamp":55.0}"#,
            r#"{"event":"tick","mode":"OBJECT","timestamp":3.0}"#,
        ]
        .join("\n");

        let stats = feed(&mut engine, Cursor::new(input), follow_event_clock).unwrap();

        assert_eq!(stats.regressed, 1);
        assert_eq!(engine.accumulator_total(), 0.0);
        assert_eq!(engine.ledger_scope_total(ALL_SCOPE), 5.0);
    }
}
