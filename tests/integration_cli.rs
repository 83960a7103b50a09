use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn get_cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ballflight"))
}

fn run(args: &[&str]) -> Output {
    Command::new(get_cli_binary())
        .args(args)
        .env_remove("BALLFLIGHT_CONFIG")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command")
}

fn run_with_config_env(args: &[&str], config: &Path) -> Output {
    Command::new(get_cli_binary())
        .args(args)
        .env("BALLFLIGHT_CONFIG", config)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command")
}

fn club_row<'a>(clubs: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    clubs
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["club"] == name)
        .unwrap()
}

#[test]
fn test_cli_shot_table() {
    let output = run(&["shot", "--club", "7-Iron", "--speed", "85"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BALL FLIGHT RESULTS"));
    assert!(stdout.contains("Carry"));
    assert!(stdout.contains("Straight"));
}

#[test]
fn test_cli_shot_json_payload() {
    let output = run(&["shot", "--club", "driver", "--speed", "100", "--face", "-2", "--path", "2", "-o", "json"]);

    assert!(output.status.success());
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(payload["clubType"], "Driver");
    assert!(payload["carry"].as_f64().unwrap() > 150.0);
    assert!(payload["lateral"].as_f64().unwrap() < 0.0);
    assert!(payload["points"].as_array().unwrap().len() > 100);
    assert_eq!(payload["total"], payload["carry"]);
}

#[test]
fn test_cli_shot_csv_record() {
    let output = run(&["shot", "--club", "PW", "--speed", "75", "--output", "csv"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert!(lines.next().unwrap().starts_with("club,club_speed_mph"));
    assert!(lines.next().unwrap().starts_with("PW,75.0"));
}

#[test]
fn test_cli_shot_sampled() {
    let output = run(&["shot", "--club", "7i", "--speed", "85", "--sample", "25", "-o", "csv"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "downrange_yd,lateral_yd,height_yd,time_s");
    assert!(lines[1].starts_with("0.0,"));
    assert!(lines[2].starts_with("25.0,"));
}

#[test]
fn test_cli_shot_with_wind() {
    let calm = run(&["shot", "--club", "7-Iron", "--speed", "85", "-o", "json"]);
    let head = run(&["shot", "--club", "7-Iron", "--speed", "85", "--wind-speed", "15", "--wind-dir", "0", "-o", "json"]);
    assert!(calm.status.success() && head.status.success());

    let calm: serde_json::Value = serde_json::from_slice(&calm.stdout).unwrap();
    let head: serde_json::Value = serde_json::from_slice(&head.stdout).unwrap();
    assert!(head["carry"].as_f64().unwrap() < calm["carry"].as_f64().unwrap());
}

#[test]
fn test_cli_launch_command() {
    let output = run(&["launch", "--ball-speed", "150", "--vla", "12", "--spin", "2600", "-o", "json"]);

    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(result["carry_yards"].as_f64().unwrap() > 200.0);
    assert_eq!(result["launch"]["backspin_rpm"], 2600.0);
}

#[test]
fn test_cli_validate() {
    let output = run(&["validate"]);

    assert!(output.status.success(), "reference fixtures should pass");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Driver"));
    assert!(stdout.contains("7-Iron"));
    assert!(stdout.contains("PASS"));
    assert!(!stdout.contains("FAIL"));
}

#[test]
fn test_cli_validate_impossible_tolerance_fails() {
    let output = run(&["validate", "--tolerance", "0.0001"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FAIL"));
}

#[test]
fn test_cli_clubs_json() {
    let output = run(&["clubs", "-o", "json"]);

    assert!(output.status.success());
    let clubs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let clubs = clubs.as_array().unwrap();
    assert_eq!(clubs.len(), 21);
    assert_eq!(clubs[0]["club"], "Driver");
}

#[test]
fn test_cli_dispersion_reproducible() {
    let args = ["dispersion", "--club", "7-Iron", "--speed", "85", "-n", "25", "--seed", "9", "-o", "json"];
    let a = run(&args);
    let b = run(&args);

    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
    let results: serde_json::Value = serde_json::from_slice(&a.stdout).unwrap();
    assert_eq!(results["carries"].as_array().unwrap().len(), 25);
}

#[test]
fn test_cli_config_file_overrides_club() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"clubs": [{{"club": "7-Iron", "base_loft_deg": 30.0, "smash_factor": 1.40, "spin": {{"base_rpm": 6000}}}}]}}"#
    )
    .unwrap();
    let config = file.path().to_str().unwrap();

    let stock = run(&["shot", "--club", "7-Iron", "--speed", "85", "-o", "json"]);
    let strong = run(&["--config", config, "shot", "--club", "7-Iron", "--speed", "85", "-o", "json"]);
    assert!(strong.status.success());

    let stock: serde_json::Value = serde_json::from_slice(&stock.stdout).unwrap();
    let strong: serde_json::Value = serde_json::from_slice(&strong.stdout).unwrap();
    assert!(strong["ballSpeed"].as_f64().unwrap() > stock["ballSpeed"].as_f64().unwrap());
}

#[test]
fn test_cli_unknown_club() {
    let output = run(&["shot", "--club", "11-Iron", "--speed", "80"]);
    assert!(!output.status.success(), "Should fail with unknown club");
}

#[test]
fn test_cli_missing_config_file() {
    let output = run(&["--config", "/nonexistent/ballflight.json", "clubs"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("shot"));
    assert!(stdout.contains("validate"));
    assert!(stdout.contains("dispersion"));
}

#[test]
fn test_cli_config_env_var_loads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"clubs": [{{"club": "7-Iron", "base_loft_deg": 30.0, "smash_factor": 1.40, "spin": {{"base_rpm": 6000}}}}]}}"#
    )
    .unwrap();

    let output = run_with_config_env(&["clubs", "-o", "json"], file.path());
    assert!(output.status.success());
    let clubs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(club_row(&clubs, "7-Iron")["base_loft_deg"], 30.0);
    assert_eq!(club_row(&clubs, "Driver")["base_loft_deg"], 10.5);
}

#[test]
fn test_cli_config_env_var_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_config_env(&["clubs", "-o", "json"], &dir.path().join("absent.json"));

    assert!(output.status.success());
    let clubs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(clubs.as_array().unwrap().len(), 21);
    assert_eq!(club_row(&clubs, "7-Iron")["base_loft_deg"], 34.0);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration file not found"));
}

#[test]
fn test_cli_config_env_var_malformed_file_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"simulation\": ").unwrap();

    let output = run_with_config_env(&["clubs"], file.path());
    assert!(!output.status.success());
}

#[test]
fn test_cli_config_out_of_range_spin_decay_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"spin_decay": {{"floor_fraction": 1.5}}}}"#).unwrap();

    let output = run_with_config_env(&["shot", "--club", "7-Iron", "--speed", "85"], file.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"));
}
