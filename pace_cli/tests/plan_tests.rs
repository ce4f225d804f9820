//! Integration tests for the `pace plan` command.
//!
//! These tests verify end-to-end behavior including:
//! - Plans computed from flags, totals and goal files
//! - Expired, complete and fully-excluded windows
//! - JSON output and CSV export
//! - Config defaults and input validation

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test directory with an empty config file
fn setup_test_dir() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "").expect("Failed to write config");
    (temp_dir, config_path)
}

/// Helper to get the CLI binary
fn cli() -> Command {
    Command::cargo_bin("pace").expect("Failed to find pace binary")
}

fn plan_json(args: &[&str], config_path: &PathBuf) -> Value {
    let output = cli()
        .arg("plan")
        .args(args)
        .arg("--config")
        .arg(config_path)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    serde_json::from_slice(&output).expect("plan output is not JSON")
}

fn allocated(plan: &Value) -> Vec<u64> {
    plan["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["allocated"].as_u64().unwrap())
        .collect()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deadline pacing"));
}

#[test]
fn test_exponential_plan_sums_to_remaining() {
    let (_temp_dir, config_path) = setup_test_dir();

    let plan = plan_json(
        &[
            "--remaining",
            "137",
            "--today",
            "2024-03-04",
            "--deadline",
            "2024-03-15",
            "--distribution",
            "exponential",
            "--intensity",
            "0.7",
        ],
        &config_path,
    );

    assert_eq!(plan["effective_day_count"], 11);
    assert_eq!(plan["is_expired"], false);
    assert_eq!(allocated(&plan).iter().sum::<u64>(), 137);
    assert_eq!(plan["phases"].as_array().unwrap().len(), 4);
}

#[test]
fn test_excluded_weekends_by_name() {
    let (_temp_dir, config_path) = setup_test_dir();

    let plan = plan_json(
        &[
            "--remaining",
            "100",
            "--today",
            "2024-03-04",
            "--deadline",
            "2024-03-18",
            "--distribution",
            "linear",
            "--exclude",
            "sat,sun",
        ],
        &config_path,
    );

    let excluded: Vec<_> = plan["days"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|d| d["is_excluded"] == true)
        .collect();
    assert_eq!(excluded.len(), 4);
    assert!(excluded.iter().all(|d| d["allocated"] == 0));
    assert_eq!(plan["effective_day_count"], 10);
    assert_eq!(allocated(&plan).iter().sum::<u64>(), 100);
}

#[test]
fn test_table_output_shows_phases_and_today() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--remaining", "300", "--today", "2024-03-04", "--deadline", "2024-03-14"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exponential distribution"))
        .stdout(predicate::str::contains("Phases"))
        .stdout(predicate::str::contains("Início"))
        .stdout(predicate::str::contains("Today:"));
}

#[test]
fn test_expired_deadline() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--remaining", "20", "--today", "2024-03-04", "--deadline", "2024-03-04"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("has passed"));
}

#[test]
fn test_completed_goal() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--total", "50", "--done", "60"])
        .args(["--today", "2024-03-04", "--deadline", "2024-03-10"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already complete"));
}

#[test]
fn test_all_days_excluded() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--remaining", "40", "--today", "2024-03-04", "--deadline", "2024-03-08"])
        .args(["--exclude", "0,1,2,3,4,5,6"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("40 units left unallocated"));
}

#[test]
fn test_plan_from_goal_file() {
    let (temp_dir, config_path) = setup_test_dir();
    let goal_path = temp_dir.path().join("goal.json");
    fs::write(
        &goal_path,
        r#"{ "title": "Dune", "unit": "pages", "total": 412, "done": 275, "deadline": "2024-03-15" }"#,
    )
    .unwrap();

    cli()
        .arg("plan")
        .arg("--goal")
        .arg(&goal_path)
        .args(["--today", "2024-03-04"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("PLAN: Dune (137 pages left)"));
}

#[test]
fn test_csv_export() {
    let (temp_dir, config_path) = setup_test_dir();
    let csv_path = temp_dir.path().join("out").join("plan.csv");

    cli()
        .arg("plan")
        .args(["--remaining", "10", "--today", "2024-03-04", "--deadline", "2024-03-07"])
        .args(["--distribution", "linear"])
        .arg("--csv")
        .arg(&csv_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 days"));

    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(content.starts_with("date,weekday,allocated"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_config_supplies_defaults() {
    let (_temp_dir, config_path) = setup_test_dir();
    fs::write(
        &config_path,
        "[planner]\ndistribution = \"linear\"\nexcluded_weekdays = [0, 6]\n",
    )
    .unwrap();

    let plan = plan_json(
        &["--remaining", "100", "--today", "2024-03-04", "--deadline", "2024-03-18"],
        &config_path,
    );

    assert_eq!(plan["distribution"], "linear");
    assert_eq!(plan["effective_day_count"], 10);
}

#[test]
fn test_invalid_config_fails() {
    let (_temp_dir, config_path) = setup_test_dir();
    fs::write(&config_path, "[planner]\nintensity = 4.0\n").unwrap();

    cli()
        .arg("plan")
        .args(["--remaining", "10", "--deadline", "2030-01-01"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("intensity"));
}

#[test]
fn test_missing_deadline_fails() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--remaining", "10"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--deadline is required"));
}

#[test]
fn test_missing_quantity_fails() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--deadline", "2030-01-01"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("one of --remaining"));
}

#[test]
fn test_unknown_weekday_fails() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--remaining", "10", "--deadline", "2030-01-01", "--exclude", "funday"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown weekday"));
}

#[test]
fn test_done_without_total_is_rejected() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--remaining", "10", "--done", "5", "--deadline", "2030-01-01"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--total"));
}

#[test]
fn test_unknown_distribution_fails() {
    let (_temp_dir, config_path) = setup_test_dir();

    cli()
        .arg("plan")
        .args(["--remaining", "10", "--deadline", "2030-01-01", "--distribution", "wobbly"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown distribution"));
}
