//! Integration tests for the pacematch binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan inspection (steps, metrics, validation, templates)
//! - Activity resolution and scoring
//! - Lap matching from embedded laps and lap CSV files
//! - Report logging and CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// warmup 10min, 2 x (400m @ 3:45/km, 200m jog), cooldown 5min
const TRACK_PLAN: &str = r#"{
    "id": "track",
    "name": "Track reps",
    "blocks": [
        {"id": "wu", "step_kind": "warmup", "duration": {"kind": "time", "seconds": 600}},
        {"id": "rep", "step_kind": "interval",
         "duration": {"kind": "distance", "meters": 400},
         "target": {"kind": "pace", "min": "3:45", "max": "3:50"},
         "group": {"group_id": "main", "repeat_count": 2}},
        {"id": "jog", "step_kind": "recovery",
         "duration": {"kind": "distance", "meters": 200},
         "group": {"group_id": "main", "repeat_count": 2}},
        {"id": "cd", "step_kind": "cooldown", "duration": {"kind": "time", "seconds": 300}}
    ]
}"#;

const ACTIVITIES: &str = r#"[
    {"id": "morning", "start": "2026-03-14T07:00:00Z",
     "total_distance_meters": 1250, "total_duration_seconds": 1260,
     "laps": [
        {"distance_meters": 1500, "elapsed_seconds": 620},
        {"distance_meters": 402, "elapsed_seconds": 90},
        {"distance_meters": 198, "elapsed_seconds": 70},
        {"distance_meters": 399, "elapsed_seconds": 91},
        {"distance_meters": 205, "elapsed_seconds": 72},
        {"distance_meters": 800, "elapsed_seconds": 310}
     ]},
    {"id": "commute", "start": "2026-03-14T18:00:00Z",
     "total_distance_meters": 4000, "total_duration_seconds": 1000},
    {"id": "sunday", "start": "2026-03-16T09:00:00Z",
     "total_distance_meters": 1200, "total_duration_seconds": 1200}
]"#;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary with an isolated (empty) config
fn cli(dir: &Path) -> Command {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        fs::write(&config_path, "").expect("write config");
    }
    let mut cmd = Command::cargo_bin("pacematch").expect("Failed to find pacematch binary");
    cmd.arg("--config").arg(config_path);
    cmd
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    (
        write_file(dir, "plan.json", TRACK_PLAN),
        write_file(dir, "activities.json", ACTIVITIES),
    )
}

fn analyze_json(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").output().expect("run pacematch");
    assert!(
        output.status.success(),
        "pacematch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

#[test]
fn test_cli_help() {
    let dir = setup_test_dir();
    cli(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Match recorded runs against structured workout plans",
        ));
}

#[test]
fn test_steps_expands_groups() {
    let dir = setup_test_dir();
    let (plan, _) = fixtures(dir.path());

    cli(dir.path())
        .arg("steps")
        .arg("--plan")
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("6 steps"))
        .stdout(predicate::str::contains("Interval 2/2"))
        .stdout(predicate::str::contains("Recovery 1/2"));
}

#[test]
fn test_steps_json_indices() {
    let dir = setup_test_dir();
    let (plan, _) = fixtures(dir.path());

    let steps = analyze_json(cli(dir.path()).arg("steps").arg("--plan").arg(&plan));
    let indices: Vec<u64> = steps
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["step_index"].as_u64().unwrap())
        .collect();

    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_metrics_json() {
    let dir = setup_test_dir();
    let (plan, _) = fixtures(dir.path());

    let metrics = analyze_json(cli(dir.path()).arg("metrics").arg("--plan").arg(&plan));

    assert_eq!(metrics["objective_type"], "distance");
    assert_eq!(metrics["planned"]["planned_distance_meters"], 1200.0);
    assert_eq!(metrics["planned"]["planned_duration_seconds"], 1200.0);
}

#[test]
fn test_plan_and_template_are_exclusive() {
    let dir = setup_test_dir();
    let (plan, _) = fixtures(dir.path());

    cli(dir.path())
        .arg("steps")
        .arg("--plan")
        .arg(&plan)
        .arg("--template")
        .arg("track_6x400")
        .assert()
        .failure();
}

#[test]
fn test_templates_listing_and_use() {
    let dir = setup_test_dir();

    cli(dir.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("track_6x400"))
        .stdout(predicate::str::contains("easy_30min"));

    cli(dir.path())
        .arg("steps")
        .arg("--template")
        .arg("track_6x400")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interval 6/6"));
}

#[test]
fn test_unknown_template_fails() {
    let dir = setup_test_dir();

    cli(dir.path())
        .arg("metrics")
        .arg("--template")
        .arg("ultra")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown template"));
}

#[test]
fn test_validate_reports_problems() {
    let dir = setup_test_dir();
    let broken = write_file(
        dir.path(),
        "broken.json",
        r#"{"id": "broken", "blocks": [
            {"id": "a", "step_kind": "interval", "duration": {"kind": "distance", "meters": 400},
             "group": {"group_id": "g", "repeat_count": 2}},
            {"id": "b", "step_kind": "other", "duration": {"kind": "time", "seconds": 60}},
            {"id": "c", "step_kind": "recovery", "duration": {"kind": "distance", "meters": 200},
             "group": {"group_id": "g", "repeat_count": 2}}
        ]}"#,
    );

    cli(dir.path())
        .arg("validate")
        .arg("--plan")
        .arg(&broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not contiguous"));

    let (plan, _) = fixtures(dir.path());
    cli(dir.path())
        .arg("validate")
        .arg("--plan")
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_analyze_auto_picks_closest_activity() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());

    // sunday matches the plan exactly
    let analysis = analyze_json(
        cli(dir.path())
            .arg("analyze")
            .arg("--plan")
            .arg(&plan)
            .arg("--activities")
            .arg(&activities),
    );

    assert_eq!(analysis["activity_id"], "sunday");
    assert_eq!(analysis["quality"]["overall_score"], 100);
    assert!(analysis["laps"].as_array().unwrap().is_empty());
}

#[test]
fn test_analyze_on_scheduled_date_matches_laps() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());

    let analysis = analyze_json(
        cli(dir.path())
            .arg("analyze")
            .arg("--plan")
            .arg(&plan)
            .arg("--activities")
            .arg(&activities)
            .arg("--date")
            .arg("2026-03-14"),
    );

    assert_eq!(analysis["activity_id"], "morning");
    assert_eq!(analysis["quality"]["overall_score"], 96);

    let laps = analysis["laps"].as_array().unwrap();
    assert_eq!(laps.len(), 6);
    for (i, lap) in laps.iter().enumerate() {
        assert_eq!(lap["matched"], true);
        assert_eq!(lap["step_index"].as_u64(), Some(i as u64));
    }
    assert_eq!(analysis["lap_summary"]["completion_percent"], 100.0);
}

#[test]
fn test_analyze_text_output() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());

    cli(dir.path())
        .arg("analyze")
        .arg("--plan")
        .arg(&plan)
        .arg("--activities")
        .arg(&activities)
        .arg("--date")
        .arg("2026-03-14")
        .assert()
        .success()
        .stdout(predicate::str::contains("Activity: morning"))
        .stdout(predicate::str::contains("Match score: 96/100"))
        .stdout(predicate::str::contains("6/6 steps matched"));
}

#[test]
fn test_config_window_widens_candidates() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());
    fs::write(dir.path().join("config.toml"), "[resolver]\nwindow_days = 2\n").unwrap();

    let analysis = analyze_json(
        cli(dir.path())
            .arg("analyze")
            .arg("--plan")
            .arg(&plan)
            .arg("--activities")
            .arg(&activities)
            .arg("--date")
            .arg("2026-03-14"),
    );

    assert_eq!(analysis["activity_id"], "sunday");
}

#[test]
fn test_window_days_requires_date() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());

    cli(dir.path())
        .arg("analyze")
        .arg("--plan")
        .arg(&plan)
        .arg("--activities")
        .arg(&activities)
        .arg("--window-days")
        .arg("3")
        .assert()
        .failure();
}

#[test]
fn test_huge_window_covers_every_activity() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());

    let analysis = analyze_json(
        cli(dir.path())
            .arg("analyze")
            .arg("--plan")
            .arg(&plan)
            .arg("--activities")
            .arg(&activities)
            .arg("--date")
            .arg("2026-03-14")
            .arg("--window-days")
            .arg("4000000000"),
    );

    assert_eq!(analysis["activity_id"], "sunday");
}

#[test]
fn test_manual_activity_link() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());

    let analysis = analyze_json(
        cli(dir.path())
            .arg("analyze")
            .arg("--plan")
            .arg(&plan)
            .arg("--activities")
            .arg(&activities)
            .arg("--activity-id")
            .arg("commute"),
    );

    assert_eq!(analysis["activity_id"], "commute");
}

#[test]
fn test_no_activity_on_date() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());

    cli(dir.path())
        .arg("analyze")
        .arg("--plan")
        .arg(&plan)
        .arg("--activities")
        .arg(&activities)
        .arg("--date")
        .arg("2026-04-01")
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching activity found"));
}

#[test]
fn test_laps_csv_replaces_activity_laps() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());
    let laps = write_file(
        dir.path(),
        "laps.csv",
        "distance_meters,elapsed_seconds,moving_seconds\n\
         1400,590,580\n\
         15,4,4\n\
         401,,89\n\
         200,71,70\n\
         396,92,92\n\
         202,70,70\n\
         700,305,300\n",
    );

    let analysis = analyze_json(
        cli(dir.path())
            .arg("analyze")
            .arg("--plan")
            .arg(&plan)
            .arg("--activities")
            .arg(&activities)
            .arg("--date")
            .arg("2026-03-14")
            .arg("--laps")
            .arg(&laps),
    );

    let laps = analysis["laps"].as_array().unwrap();
    assert_eq!(laps.len(), 7);
    assert_eq!(laps[1]["matched"], false);
    assert_eq!(laps[2]["step_index"], 1);
    assert_eq!(analysis["lap_summary"]["unmatched_laps"], 1);
    assert_eq!(analysis["lap_summary"]["matched_steps"], 6);
}

#[test]
fn test_export_laps_csv() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());
    let export = dir.path().join("out").join("matched.csv");

    cli(dir.path())
        .arg("analyze")
        .arg("--plan")
        .arg(&plan)
        .arg("--activities")
        .arg(&activities)
        .arg("--date")
        .arg("2026-03-14")
        .arg("--export-laps")
        .arg(&export)
        .assert()
        .success();

    let content = fs::read_to_string(&export).expect("export written");
    assert_eq!(content.lines().count(), 7);
    assert!(content.starts_with("lap_index,step_index,step_label"));
}

#[test]
fn test_log_appends_reports() {
    let dir = setup_test_dir();
    let (plan, activities) = fixtures(dir.path());
    let log_path = dir.path().join("reports").join("log.jsonl");

    for _ in 0..2 {
        cli(dir.path())
            .arg("analyze")
            .arg("--plan")
            .arg(&plan)
            .arg("--activities")
            .arg(&activities)
            .arg("--log")
            .arg("--log-path")
            .arg(&log_path)
            .assert()
            .success();
    }

    let content = fs::read_to_string(&log_path).expect("log written");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let report: Value = serde_json::from_str(line).expect("report JSON");
        assert_eq!(report["plan_id"], "track");
        assert_eq!(report["activity_id"], "sunday");
        assert_eq!(report["analysis"]["plan_id"], "track");
        assert!(report["id"].is_string());
    }
}

#[test]
fn test_invalid_plan_refused_before_analysis() {
    let dir = setup_test_dir();
    let (_, activities) = fixtures(dir.path());
    let zero_repeats = write_file(
        dir.path(),
        "zero.json",
        r#"{"id": "zero", "blocks": [
            {"id": "a", "step_kind": "interval", "duration": {"kind": "distance", "meters": 400},
             "group": {"group_id": "g", "repeat_count": 0}}
        ]}"#,
    );

    cli(dir.path())
        .arg("analyze")
        .arg("--plan")
        .arg(&zero_repeats)
        .arg("--activities")
        .arg(&activities)
        .assert()
        .failure()
        .stderr(predicate::str::contains("repeat count 0"));
}
