//! Smoke tests for the keycalc binary

#![allow(deprecated)] // Command::cargo_bin is deprecated in newer assert_cmd
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the keycalc binary with a clean environment
fn keycalc() -> Command {
    let mut cmd = Command::cargo_bin("keycalc").expect("keycalc binary should exist");
    cmd.env_remove("KEYCALC_CONFIG")
        .env_remove("KEYCALC_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

fn write_config(dir: &TempDir, yaml: &str) -> std::path::PathBuf {
    let path = dir.path().join("calc.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    keycalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    keycalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_args_fails() {
    keycalc().assert().failure();
}

// ============================================================================
// Run Command Tests
// ============================================================================

#[test]
fn test_run_repeated_equals() {
    keycalc()
        .args(["run", "5+3=="])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("11"));
}

#[test]
fn test_run_chained_operations() {
    keycalc()
        .args(["run", "2+3*4="])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("20"));
}

#[test]
fn test_run_leading_minus() {
    keycalc()
        .args(["run", "-5="])
        .assert()
        .success();
}

#[test]
fn test_run_division_by_zero() {
    keycalc()
        .args(["run", "5/0="])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error"))
        .stdout(predicate::str::contains("Division by zero"));
}

#[test]
fn test_run_rounding() {
    keycalc()
        .args(["run", "0.1+0.2="])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.3"))
        .stdout(predicate::str::contains("0.30000000000000004").not());
}

#[test]
fn test_run_json() {
    let output = keycalc()
        .args(["run", "--format", "json", "50+10%"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["primary"], "5");
    assert_eq!(json["secondary"], "50 + 5");
    assert_eq!(json["errored"], false);
}

#[test]
fn test_run_steps() {
    keycalc()
        .args(["run", "--steps", "9*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[9] 9"))
        .stdout(predicate::str::contains("[*] 0  (9 ×)"));
}

#[test]
fn test_run_invalid_key() {
    keycalc()
        .args(["run", "12+q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid key 'q' at position 3"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_defaults() {
    keycalc()
        .args(["config", "--defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("error_marker: Error"))
        .stdout(predicate::str::contains("symbols: unicode"));
}

#[test]
fn test_config_file_changes_symbols() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "symbols: ascii\n");
    keycalc()
        .arg("--config")
        .arg(&path)
        .args(["run", "6*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(6 *)"));
}

#[test]
fn test_config_file_custom_marker() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "error_marker: Erro\nerror_message: Divisão por zero\n");
    keycalc()
        .arg("--config")
        .arg(&path)
        .args(["run", "1/0="])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Erro  (Divisão por zero)"));
}

#[test]
fn test_config_from_env() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "symbols: ascii\n");
    keycalc()
        .env("KEYCALC_CONFIG", &path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("symbols: ascii"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "error_marker: '42'\n");
    keycalc()
        .arg("--config")
        .arg(&path)
        .args(["run", "1+1="])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error_marker"));
}

#[test]
fn test_missing_config_fails() {
    keycalc()
        .args(["--config", "/nonexistent/calc.yaml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
