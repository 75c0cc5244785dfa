//! Tests for the `campus-launcher` binary.
//!
//! Only paths that end before the OS launch are run here.

use assert_cmd::Command;
use campus_launcher::test_utils::{ARTIFACT_PATH, BUILD_NUMBER_PATH, TestInstall};
use predicates::prelude::*;
use std::fs;

fn launcher() -> Command {
    let mut cmd = Command::cargo_bin("campus-launcher").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    launcher()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-progress"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    launcher().args(["--verbose", "--quiet"]).assert().failure();
}

/// A failed artifact download exits with status 1, keeps the old marker and
/// prints the error with a suggestion.
#[test]
fn test_failed_download_exits_with_error() {
    let install = TestInstall::new().unwrap();
    install.populate(41, b"build 41", b"store").unwrap();

    let mut server = mockito::Server::new();
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_body("42").create();
    let _artifact = server.mock("GET", ARTIFACT_PATH).with_status(500).create();

    let config = install.write_config_file(&server.url()).unwrap();

    launcher()
        .arg("--no-progress")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 500"))
        .stderr(predicate::str::contains("Failed to download application"));

    assert_eq!(install.read_version().as_deref(), Some("41"));
    assert_eq!(install.read_artifact().as_deref(), Some(&b"build 41"[..]));
}

#[test]
fn test_verbose_logs_progress_messages() {
    let install = TestInstall::new().unwrap();

    let mut server = mockito::Server::new();
    let _version = server.mock("GET", BUILD_NUMBER_PATH).with_status(404).create();

    let config = install.write_config_file(&server.url()).unwrap();

    launcher()
        .args(["--verbose", "--no-progress", "-c"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Getting local version..."))
        .stderr(predicate::str::contains("Getting online version..."))
        .stderr(predicate::str::contains("download was not attempted"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let install = TestInstall::new().unwrap();
    let config = install.write_config_file("http://127.0.0.1:1").unwrap();
    fs::write(&config, "artifact_file = \"nested/app.jar\"\n").unwrap();

    launcher()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}
