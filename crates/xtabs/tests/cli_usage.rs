//! Integration tests for argument handling that fails before any display
//! connection is attempted.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn xtabs() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xtabs"))
}

#[test]
fn test_two_sessions_is_usage_error() {
    let output = xtabs()
        .args(["work", "play"])
        .output()
        .expect("Failed to execute 'xtabs work play'");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage"),
        "expected usage on stderr, got: {}",
        stderr
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn test_help_succeeds() {
    let output = xtabs()
        .arg("--help")
        .output()
        .expect("Failed to execute 'xtabs --help'");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[session]") || stdout.contains("[SESSION]"));
}

#[test]
fn test_version_succeeds() {
    let output = xtabs()
        .arg("--version")
        .output()
        .expect("Failed to execute 'xtabs --version'");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_malformed_config_exits_with_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[bar\ntab_width = 100\n").unwrap();

    let output = xtabs()
        .args(["-q", "-c"])
        .arg(&config)
        .output()
        .expect("Failed to execute xtabs with a malformed config");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("xtabs: Failed to parse config file"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_invalid_session_name_exits_with_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(
        &config,
        format!("[session]\ndir = \"{}\"\n", temp_dir.path().display()),
    )
    .unwrap();

    let output = xtabs()
        .args(["-q", "-c"])
        .arg(&config)
        .arg("../escape")
        .output()
        .expect("Failed to execute xtabs with an invalid session name");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtabs: Invalid configuration"), "unexpected stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}
