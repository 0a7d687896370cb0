//! Basic CLI E2E tests.
//!
//! Network-free commands only; everything runs against the dev config
//! directory so the real one stays untouched.

use std::process::Command;

/// Run the CLI binary and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_classpulse"))
        .env("CLASSPULSE_ENV", "dev")
        .args(args)
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn help_lists_every_command() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    for command in ["watch", "signal", "auto", "board", "ping", "config"] {
        assert!(stdout.contains(command), "missing command: {command}");
    }
}

#[test]
fn config_show_prints_toml() {
    let (stdout, stderr, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed: {stderr}");
    assert!(stdout.contains("max_population"));
    assert!(stdout.contains("[remote]"));
}

#[test]
fn config_get_known_key() {
    let (stdout, stderr, code) = run_cli(&["config", "get", "gauge.bar_width"]);
    assert_eq!(code, 0, "config get failed: {stderr}");
    assert!(stdout.trim().parse::<u32>().is_ok());
}

#[test]
fn config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "gauge.no_such_key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn config_set_roundtrip() {
    let (_, stderr, code) = run_cli(&["config", "set", "notify.message_gap_ms", "500"]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (stdout, _, code) = run_cli(&["config", "get", "notify.message_gap_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "500");
}

#[test]
fn config_set_rejects_unknown_key() {
    let (_, _, code) = run_cli(&["config", "set", "gauge.no_such_key", "1"]);
    assert_ne!(code, 0);
}
