//! Compatibility with ledger files written by earlier add-on releases.

use hours_core::{InteractionMode, Ledger, ALL_SCOPE, TOTAL_KEY};
use tempfile::tempdir;

const LEGACY: &str = "\
[ALL]
object = 5025.375
edit_mesh = 812.5
all = 5837.875

[/home/artist/robot.blend]
object = 25.375
edit_mesh = 12.5
all = 37.875

[NoFile]
object = 5000.0
all = 5000.0

";

#[test]
fn reads_legacy_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("work_hours.ini");
    std::fs::write(&path, LEGACY).unwrap();

    let ledger = Ledger::open(&path).unwrap();

    assert_eq!(ledger.scope_total(ALL_SCOPE), 5837.875);
    assert_eq!(ledger.bucket(ALL_SCOPE, InteractionMode::EditMesh), 812.5);
    assert_eq!(ledger.bucket("/home/artist/robot.blend", InteractionMode::Object), 25.375);
    assert_eq!(ledger.bucket("NoFile", InteractionMode::Sculpt), 0.0);
    assert_eq!(ledger.get("NoFile", TOTAL_KEY, -1.0), 5000.0);
    assert!(ledger.day_scopes().is_empty());
    assert_eq!(ledger.document_scopes(), vec!["/home/artist/robot.blend", "NoFile"]);
}

#[test]
fn rewriting_untouched_legacy_file_is_byte_identical() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("work_hours.ini");
    std::fs::write(&path, LEGACY).unwrap();

    let ledger = Ledger::open(&path).unwrap();
    ledger.flush().unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), LEGACY);
}

#[test]
fn uppercase_keys_are_folded() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("work_hours.ini");
    std::fs::write(&path, "[ALL]\nSCULPT = 4.0\nALL = 4.0\n").unwrap();

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.apply(ALL_SCOPE, InteractionMode::Sculpt, 1.0);
    ledger.flush().unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[ALL]\nsculpt = 5.0\nall = 5.0\n\n"
    );
}

#[test]
fn hand_edited_total_is_not_recomputed() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("work_hours.ini");
    std::fs::write(&path, "[ALL]\nobject = 100.0\nall = 1.0\n").unwrap();

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.apply(ALL_SCOPE, InteractionMode::Object, 2.0);

    assert_eq!(ledger.bucket(ALL_SCOPE, InteractionMode::Object), 102.0);
    assert_eq!(ledger.scope_total(ALL_SCOPE), 3.0);
}
