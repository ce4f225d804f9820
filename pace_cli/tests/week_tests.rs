//! Integration tests for the `pace week` command.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const GOALS: &str = r#"{
    "defaults": {
        "1": [{ "item_id": "reading", "target_minutes": 30 }, { "item_id": "guitar", "target_minutes": 20 }],
        "2": [{ "item_id": "reading", "target_minutes": 30 }, { "item_id": "guitar", "target_minutes": 20 }],
        "3": [{ "item_id": "reading", "target_minutes": 30 }, { "item_id": "guitar", "target_minutes": 20 }],
        "4": [{ "item_id": "reading", "target_minutes": 30 }, { "item_id": "guitar", "target_minutes": 20 }],
        "5": [{ "item_id": "reading", "target_minutes": 30 }, { "item_id": "guitar", "target_minutes": 20 }]
    },
    "overrides": {
        "2024-03-08": []
    }
}"#;

const WORKLOG: &str = "item_id,date,minutes
reading,2024-03-04,90
guitar,2024-03-04,10
reading,2024-03-05,30
guitar,2024-03-05,20
guitar,2024-03-08,45
";

/// Helper to create a data directory with goal and log snapshots
fn setup_data_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("goals.json"), GOALS).unwrap();
    fs::write(temp_dir.path().join("worklog.csv"), WORKLOG).unwrap();
    fs::write(temp_dir.path().join("config.toml"), "").unwrap();
    temp_dir
}

fn cli() -> Command {
    Command::cargo_bin("pace").expect("Failed to find pace binary")
}

fn week_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = cli();
    cmd.arg("week")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--config")
        .arg(temp_dir.path().join("config.toml"))
        .args(["--date", "2024-03-06"]);
    cmd
}

#[test]
fn test_week_json_progress() {
    let temp_dir = setup_data_dir();

    let output = week_cmd(&temp_dir)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let week: Value = serde_json::from_slice(&output).unwrap();

    // Friday's empty override removes its 50 minutes of goals
    assert_eq!(week["target_minutes"], 200);
    // Monday: reading capped at 30 + guitar 10; Tuesday: 50
    assert_eq!(week["completed_minutes"], 90);
    assert_eq!(week["percentage"], 45);

    let days = week["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-03-04");
    assert_eq!(days[0]["percentage"], 80);
    assert_eq!(days[4]["target_minutes"], 0);
    assert_eq!(days[4]["percentage"], 0);
}

#[test]
fn test_week_table_output() {
    let temp_dir = setup_data_dir();

    week_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("WEEK OF 2024-03-04"))
        .stdout(predicate::str::contains("no goals"))
        .stdout(predicate::str::contains("Week: 90/200 min (45%)"));
}

#[test]
fn test_week_starting_sunday() {
    let temp_dir = setup_data_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[weekly]\nweek_starts_on = \"sunday\"\n",
    )
    .unwrap();

    week_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("WEEK OF 2024-03-03"));
}

#[test]
fn test_week_without_snapshots() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("config.toml"), "").unwrap();

    week_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Week: 0/0 min (0%)"));
}

#[test]
fn test_corrupted_goal_table_fails() {
    let temp_dir = setup_data_dir();
    fs::write(temp_dir.path().join("goals.json"), "{ invalid json }").unwrap();

    week_cmd(&temp_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON"));
}
