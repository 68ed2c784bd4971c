//! Corruption recovery tests for the rehab binary.
//!
//! These tests verify the system can handle:
//! - Corrupted or truncated progress files
//! - Records written with missing fields
//! - Corrupted meal journal lines

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Write as IoWrite;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    temp_dir
}

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rehab").expect("Failed to find rehab binary");
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

#[test]
fn test_corrupted_progress_file_starts_over() {
    let temp_dir = setup_test_dir();
    let progress_path = temp_dir.path().join("data/progress.json");
    fs::write(&progress_path, "{ invalid json }}}}").unwrap();

    cli(&temp_dir)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("DAY 1"));

    cli(&temp_dir)
        .args(["complete", "--back", "1", "--knee", "1", "--date", "2024-01-01"])
        .assert()
        .success();

    let progress: Value =
        serde_json::from_str(&fs::read_to_string(&progress_path).unwrap()).unwrap();
    assert_eq!(progress["currentDay"], 2);
    assert_eq!(progress["streak"], 1);
}

#[test]
fn test_truncated_progress_file() {
    let temp_dir = setup_test_dir();
    let progress_path = temp_dir.path().join("data/progress.json");
    fs::write(&progress_path, r#"{"currentDay":5,"completedDays":[1,2"#).unwrap();

    cli(&temp_dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of 42"));
}

#[test]
fn test_record_with_missing_fields() {
    let temp_dir = setup_test_dir();
    let progress_path = temp_dir.path().join("data/progress.json");
    fs::write(&progress_path, r#"{"currentDay":4}"#).unwrap();

    cli(&temp_dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 4 of 42"))
        .stdout(predicate::str::contains("Streak:     0 days"));
}

#[test]
fn test_out_of_range_scores_clamped() {
    let temp_dir = setup_test_dir();
    let progress_path = temp_dir.path().join("data/progress.json");
    fs::write(
        &progress_path,
        r#"{"currentDay":2,"completedDays":[1],"painLog":{"2024-01-01":{"backPain":15,"kneePain":3,"notes":"","dayNumber":1}},"streak":1}"#,
    )
    .unwrap();

    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("back 10/10"))
        .stdout(predicate::str::contains("Worst Possible"));

    cli(&temp_dir)
        .args(["edit", "2024-01-01", "--notes", "rechecked"])
        .assert()
        .success();

    let progress: Value =
        serde_json::from_str(&fs::read_to_string(&progress_path).unwrap()).unwrap();
    assert_eq!(progress["painLog"]["2024-01-01"]["backPain"], 10);
    assert_eq!(progress["painLog"]["2024-01-01"]["notes"], "rechecked");
}

#[test]
fn test_corrupted_meal_lines_ignored() {
    let temp_dir = setup_test_dir();
    let journal = temp_dir.path().join("data/meals.jsonl");

    let mut file = fs::File::create(&journal).unwrap();
    writeln!(file, "{{ not a meal }}").unwrap();
    drop(file);

    cli(&temp_dir).args(["scan", "fitt-003"]).assert().success();

    cli(&temp_dir)
        .arg("meals")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vegan Power Bowl"))
        .stdout(predicate::str::contains("Total: 400 / 2400 kcal"));
}

#[test]
fn test_history_with_empty_progress_dir() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions logged yet"));
}
