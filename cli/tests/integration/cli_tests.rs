//! Integration tests for argument parsing and configuration errors.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn smoke() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stemcell-smoke"));
    cmd.env_clear();
    cmd.env("PATH", std::env::var_os("PATH").unwrap_or_default());
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_usage() {
    // NO_COLOR supplies a global arg, so clap reports the missing subcommand
    smoke()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_no_args_without_env_shows_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stemcell-smoke"));
    cmd.env_clear()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Stemcell smoke tests"));
}

#[test]
fn test_cli_help_lists_commands() {
    smoke()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("teardown"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    smoke()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stemcell-smoke"));
}

#[test]
fn test_unknown_command_is_rejected() {
    smoke().arg("deploy").assert().code(2);
}

// --- NO_COLOR handling ---

#[test]
fn test_no_color_conventional_values_are_accepted() {
    for value in ["1", "true", "yes", "0", ""] {
        smoke()
            .env("NO_COLOR", value)
            .arg("check")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("BOSH_ENVIRONMENT was not set"));
    }
}

// --- Configuration errors ---

#[test]
fn test_missing_environment_names_first_variable() {
    smoke()
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BOSH_ENVIRONMENT was not set"));
}

#[test]
fn test_missing_variable_after_earlier_ones_are_set() {
    smoke()
        .env("BOSH_ENVIRONMENT", "10.0.0.6")
        .arg("setup")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BOSH_CLIENT was not set"));
}

#[test]
fn test_missing_variable_json_error_object() {
    let output = smoke()
        .args(["--json", "teardown"])
        .output()
        .expect("binary runs");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout must stay clean in JSON mode");
    let value: serde_json::Value =
        serde_json::from_slice(&output.stderr).expect("stderr is a JSON error object");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "config");
    assert_eq!(value["message"], "BOSH_ENVIRONMENT was not set");
}

#[test]
fn test_invalid_timeout_is_a_config_error() {
    let mut cmd = smoke();
    for name in stemcell_smoke::domain::REQUIRED_VARIABLES {
        cmd.env(name, "x");
    }
    cmd.env("SMOKE_COMMAND_TIMEOUT_SECS", "soon")
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"));
}
