// tests/history.rs

use std::fs;
use std::path::PathBuf;

use calc_repl::{CalculationRecord, History, LoadError, SaveError};
use tempfile::{tempdir, TempDir};

fn scratch() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("history.csv");
    (dir, path)
}

fn history_of(lines: &[&str]) -> History {
    let mut history = History::new();
    for line in lines {
        history.append_line(line).expect("valid record");
    }
    history
}

fn texts(history: &History) -> Vec<String> {
    history.iter().map(|r| r.to_string()).collect()
}

#[test]
fn append_then_snapshot_preserves_order() {
    let history = history_of(&["add 2 3 = 5", "subtract 5 2 = 3", "multiply 2 3 = 6"]);
    assert_eq!(texts(&history), ["add 2 3 = 5", "subtract 5 2 = 3", "multiply 2 3 = 6"]);
}

#[test]
fn clear_is_idempotent() {
    let mut history = history_of(&["add 2 3 = 5"]);
    history.clear();
    history.clear();
    assert!(history.is_empty());
}

#[test]
fn undo_after_clear_reports_empty() {
    let mut history = history_of(&["add 2 3 = 5"]);
    history.clear();
    assert!(history.undo_last().is_none());
    assert_eq!(history.len(), 0);
}

#[test]
fn save_writes_header_and_rows() {
    let (_dir, path) = scratch();
    let history = history_of(&["add 2 3 = 5", "subtract 10 4 = 6"]);
    history.save(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "calculations\nadd 2 3 = 5\nsubtract 10 4 = 6\n");
}

#[test]
fn save_empty_history_writes_header_only() {
    let (_dir, path) = scratch();
    History::new().save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "calculations\n");
}

#[test]
fn save_overwrites_existing_file() {
    let (_dir, path) = scratch();
    fs::write(&path, "calculations\nold 1 1 = 1\nold 2 2 = 2\n").unwrap();
    history_of(&["add 1 1 = 2"]).save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "calculations\nadd 1 1 = 2\n");
}

#[test]
fn round_trip_empty_single_and_many() {
    let cases: [&[&str]; 3] = [
        &[],
        &["add 2.0 3.0 = 5.0"],
        &["add 2.0 3.0 = 5.0", "div 1.0 3.0 = 0.3333333333333333", "expo -8.0 0.5 = NaN"],
    ];
    for lines in cases {
        let (_dir, path) = scratch();
        let original = history_of(lines);
        original.save(&path).unwrap();

        let mut restored = history_of(&["stale 1 1 = 1"]);
        let count = restored.load(&path).unwrap();
        assert_eq!(count, lines.len());
        assert_eq!(restored.snapshot(), original.snapshot());
    }
}

#[test]
fn round_trip_generated_records() {
    let (_dir, path) = scratch();
    let mut original = History::new();
    original.append(CalculationRecord::new("multi", 4.2, 5.1, 4.2 * 5.1));
    original.append(CalculationRecord::new("mod", -5.0, 3.0, 1.0));
    original.save(&path).unwrap();

    let mut restored = History::new();
    restored.load(&path).unwrap();
    assert_eq!(restored.snapshot(), original.snapshot());
    assert_eq!(restored.snapshot()[1].operands(), (-5.0, 3.0));
}

#[test]
fn load_missing_file_leaves_history_untouched() {
    let (_dir, path) = scratch();
    let mut history = history_of(&["add 2 3 = 5"]);
    let err = history.load(&path).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    assert!(!err.is_empty_or_malformed());
    assert_eq!(texts(&history), ["add 2 3 = 5"]);
}

#[test]
fn load_empty_file_reports_empty() {
    let (_dir, path) = scratch();
    fs::write(&path, "").unwrap();
    let mut history = history_of(&["add 2 3 = 5"]);
    let err = history.load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Empty(_)));
    assert!(err.is_empty_or_malformed());
    assert_eq!(err.to_string(), format!("The file {} is empty.", path.display()));
    assert_eq!(history.len(), 1);
}

#[test]
fn load_without_column_reports_malformed() {
    let (_dir, path) = scratch();
    fs::write(&path, "something_else\nadd 2 3 = 5\n").unwrap();
    let mut history = history_of(&["add 1 1 = 2"]);
    let err = history.load(&path).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { .. }));
    assert!(err.is_empty_or_malformed());
    assert_eq!(texts(&history), ["add 1 1 = 2"]);
}

#[test]
fn load_header_only_yields_empty_history() {
    let (_dir, path) = scratch();
    fs::write(&path, "calculations\n").unwrap();
    let mut history = history_of(&["add 1 1 = 2"]);
    assert_eq!(history.load(&path).unwrap(), 0);
    assert!(history.is_empty());
}

#[test]
fn load_drops_blank_and_unparseable_cells() {
    let (_dir, path) = scratch();
    fs::write(
        &path,
        "calculations\nadd 2 3 = 5\n\"\"\n   \nnot a record\nsub 5 1 = 4\n",
    )
    .unwrap();
    let mut history = History::new();
    assert_eq!(history.load(&path).unwrap(), 2);
    assert_eq!(texts(&history), ["add 2 3 = 5", "sub 5 1 = 4"]);
}

#[test]
fn load_picks_designated_column_among_others() {
    let (_dir, path) = scratch();
    fs::write(
        &path,
        "id,calculations,note\n1,add 2 3 = 5,first\n2,,blank\n3,\"multi 2 3 = 6\",third\n4\n",
    )
    .unwrap();
    let mut history = History::new();
    history.load(&path).unwrap();
    assert_eq!(texts(&history), ["add 2 3 = 5", "multi 2 3 = 6"]);
}

#[test]
fn load_ignores_undecodable_bytes_outside_the_column() {
    let (_dir, path) = scratch();
    fs::write(
        &path,
        b"calculations,note\nadd 2 3 = 5,\xff\xfe\n\xff\xfe,x\nsub 5 1 = 4,ok\n".as_slice(),
    )
    .unwrap();
    let mut history = History::new();
    assert_eq!(history.load(&path).unwrap(), 2);
    assert_eq!(texts(&history), ["add 2 3 = 5", "sub 5 1 = 4"]);
}

#[test]
fn load_undecodable_header_reports_malformed() {
    let (_dir, path) = scratch();
    fs::write(&path, b"calculations,\xff\xfe\nadd 2 3 = 5,x\n".as_slice()).unwrap();
    let mut history = history_of(&["add 1 1 = 2"]);
    let err = history.load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Malformed { .. }));
    assert!(err.is_empty_or_malformed());
    assert_eq!(texts(&history), ["add 1 1 = 2"]);
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("history.csv");
    let err = history_of(&["add 1 1 = 2"]).save(&path).unwrap_err();
    assert!(matches!(err, SaveError::Csv { .. } | SaveError::Io { .. }));
    assert!(!path.exists());
}
