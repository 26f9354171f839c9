//! Integration tests for the climate-risk CLI

use std::path::PathBuf;
use std::process::{Command, Output};

use approx::assert_relative_eq;
use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the binary with a fixed config so a user config file cannot interfere
fn run(args: &[&str]) -> Output {
    run_with_env(args, &[])
}

fn run_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_climate-risk"))
        .arg("--config")
        .arg(fixture("minimal.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .envs(vars.iter().copied())
        .output()
        .expect("Failed to execute command")
}

fn run_json(args: &[&str]) -> Value {
    let output = run(args);
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn path_arg(name: &str) -> String {
    fixture(name).to_string_lossy().into_owned()
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_climate-risk"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("climate-risk"));
    assert!(stdout.contains("score"));
    assert!(stdout.contains("thresholds"));
}

#[test]
fn test_score_beach_day() {
    let archive = path_arg("archive.json");
    let value = run_json(&["score", "--archive", &archive, "--activity", "Beach Day"]);

    assert_eq!(value["riskScore"], 25);
    assert_eq!(value["p90_temp"], 30.0);
    assert_relative_eq!(
        value["insights"]["chanceOfRain"].as_f64().unwrap(),
        100.0 / 3.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        value["insights"]["chanceOfExtremeHeat"].as_f64().unwrap(),
        100.0 / 12.0,
        epsilon = 1e-9
    );
    assert_eq!(value["historicalTemps"].as_array().unwrap().len(), 12);
    assert!(
        value["summary"]
            .as_str()
            .unwrap()
            .contains("great day for a beach day")
    );
}

#[test]
fn test_score_unknown_activity_uses_default_weights() {
    let archive = path_arg("archive.json");
    let value = run_json(&["score", "--archive", &archive, "--activity", "Kayaking"]);

    // 0.8 * 33.33 + 0.2 * 8.33
    assert_eq!(value["riskScore"], 28);
    assert!(value["summary"].as_str().unwrap().contains("kayaking"));
}

#[test]
fn test_score_text_report() {
    let archive = path_arg("archive.json");
    let output = run(&[
        "score",
        "--archive",
        &archive,
        "--activity",
        "Hiking Trip",
        "--format",
        "text",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hiking Trip: risk score 18 (Low)"));
    assert!(stdout.contains("20.0°C to 31.0°C"));
    assert!(stdout.contains("25.5°C"));
}

#[test]
fn test_score_short_archive_is_insufficient() {
    let archive = path_arg("short_archive.json");
    let value = run_json(&["score", "--archive", &archive, "--activity", "Beach Day"]);

    assert_eq!(value["riskScore"], "N/A");
    assert_eq!(value["historicalTemps"], serde_json::json!([]));
    assert_eq!(value["insights"], serde_json::json!({}));
}

#[test]
fn test_thresholds_from_records() {
    let records = path_arg("records.json");
    let value = run_json(&[
        "thresholds",
        "--records",
        &records,
        "--max-temp",
        "30",
        "--min-temp",
        "5",
        "--max-precipitation",
        "10",
        "--max-wind",
        "20",
    ]);

    assert_eq!(value["probability"], 60);
    assert_eq!(value["trend"], "Warming Trend");
    assert_eq!(value["summary"], "A moderate probability of unfavorable weather.");
}

#[test]
fn test_thresholds_from_archive() {
    let archive = path_arg("archive.json");
    let value = run_json(&[
        "thresholds",
        "--archive",
        &archive,
        "--max-temp",
        "28",
        "--min-temp",
        "-5",
        "--max-precipitation",
        "10",
        "--max-wind",
        "30",
    ]);

    assert_eq!(value["probability"], 25);
    assert_eq!(value["trend"], "Warming Trend");
    assert_eq!(value["summary"], "A low probability of unfavorable weather.");
}

#[test]
fn test_thresholds_requires_a_source() {
    let output = run(&[
        "thresholds",
        "--max-temp",
        "30",
        "--min-temp",
        "5",
        "--max-precipitation",
        "10",
        "--max-wind",
        "20",
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_analyze_request() {
    let request = path_arg("request.json");
    let value = run_json(&["analyze", "--request", &request]);

    assert_eq!(value["mode"], "threshold_count");
    assert_eq!(value["result"]["probability"], 50);
    assert_eq!(value["result"]["trend"], "Cooling Trend");
}

#[test]
fn test_export_to_stdout() {
    let archive = path_arg("archive.json");
    let output = run(&["export", "--archive", &archive]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(
        "Year,Max_Temperature_C,Precipitation_mm,Max_Wind_Speed_kmh\r\n\
         2014,20,0,10\r\n\
         2015,21,0.5,12.5\r\n"
    ));
    assert_eq!(stdout.lines().count(), 13);
}

#[test]
fn test_export_named_report() {
    let dir = std::env::temp_dir().join(format!("climate-risk-export-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_climate-risk"))
        .current_dir(&dir)
        .arg("--config")
        .arg(fixture("minimal.toml"))
        .args(["export", "--archive"])
        .arg(fixture("archive.json"))
        .args(["--city", "Zurich, Switzerland", "--date", "2026-07-14"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let report = dir.join("Climate_Report_Zurich_2026-07-14.csv");
    let body = std::fs::read_to_string(&report).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert!(body.ends_with("2025,31,12,25\r\n"));
}

#[test]
fn test_window() {
    let value = run_json(&[
        "window",
        "--date",
        "2026-07-14",
        "--lat",
        "47.37",
        "--lon",
        "8.55",
        "--current-year",
        "2026",
    ]);

    assert_eq!(value["start_date"], "1996-07-14");
    assert_eq!(value["end_date"], "2025-07-14");
    assert!(
        value["url"]
            .as_str()
            .unwrap()
            .starts_with("https://archive-api.open-meteo.com/v1/archive?latitude=47.37")
    );
}

#[test]
fn test_window_rejects_bad_latitude() {
    let output = run(&[
        "window",
        "--date",
        "2026-07-14",
        "--lat",
        "95",
        "--lon",
        "8.55",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("latitude"));
}

#[test]
fn test_profiles_from_config() {
    let output = Command::new(env!("CARGO_BIN_EXE_climate-risk"))
        .arg("--config")
        .arg(fixture("profiles.toml"))
        .arg("profiles")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = value["profiles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Beach Day", "Hiking Trip", "Picnic"]);
    assert_eq!(value["default_weights"]["rain"], 0.8);
}

#[test]
fn test_missing_archive_file_fails() {
    let output = run(&[
        "score",
        "--archive",
        "/nonexistent/archive.json",
        "--activity",
        "Beach Day",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read archive file"));
}

#[test]
fn test_environment_variable_override() {
    let output = run_with_env(
        &[
            "window",
            "--date",
            "2026-07-14",
            "--lat",
            "47.37",
            "--lon",
            "8.55",
            "--current-year",
            "2026",
        ],
        &[("CLIMATE_RISK_ARCHIVE__YEARS", "20")],
    );
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["start_date"], "2006-07-14");
    assert_eq!(value["end_date"], "2025-07-14");
}

#[test]
fn test_invalid_environment_override_is_rejected() {
    let output = run_with_env(&["profiles"], &[("CLIMATE_RISK_ARCHIVE__YEARS", "0")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Archive window"));
}

#[test]
fn test_verbose_json_logging_goes_to_stderr() {
    let archive = path_arg("archive.json");
    let output = run_with_env(
        &["--verbose", "score", "--archive", &archive, "--activity", "Beach Day"],
        &[("CLIMATE_RISK_LOGGING__FORMAT", "json")],
    );
    assert!(output.status.success());

    // stdout stays a single JSON document
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["riskScore"], 25);

    let stderr = String::from_utf8_lossy(&output.stderr);
    let events: Vec<Value> = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("log line is not JSON"))
        .collect();
    assert!(events.iter().any(|event| {
        event["level"] == "DEBUG" && event["fields"]["message"] == "archive loaded"
    }));
}

#[test]
fn test_rust_log_wins_over_verbose() {
    let archive = path_arg("archive.json");
    let output = run_with_env(
        &["--verbose", "score", "--archive", &archive, "--activity", "Beach Day"],
        &[("CLIMATE_RISK_LOGGING__FORMAT", "json"), ("RUST_LOG", "error")],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).trim().is_empty());
}
