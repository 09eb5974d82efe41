//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a temporary organization
//! file and verify outputs.

use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "clockhound-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn temp_org_file() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("org.toml").to_string_lossy().to_string();
    let (_, stderr, code) = run_cli(&["org", "init", "--file", &path]);
    assert_eq!(code, 0, "org init failed: {stderr}");
    (dir, path)
}

#[test]
fn test_org_init_and_status() {
    let (_dir, path) = temp_org_file();
    let (stdout, _, code) = run_cli(&["org", "status", "--file", &path]);
    assert_eq!(code, 0, "org status failed");
    assert!(stdout.contains("Organization: acme"));
    assert!(stdout.contains("@ann"));
    assert!(stdout.contains("@bob"));
}

#[test]
fn test_org_status_json() {
    let (_dir, path) = temp_org_file();
    let (stdout, _, code) = run_cli(&["org", "status", "--file", &path, "--json"]);
    assert_eq!(code, 0, "org status --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["name"], "acme");
    assert_eq!(parsed["hound_frequency"], 8.0);
}

#[test]
fn test_settings_pause_persists() {
    let (_dir, path) = temp_org_file();
    let (stdout, _, code) = run_cli(&["settings", "--file", &path, "--user", "ann", "pause"]);
    assert_eq!(code, 0, "settings pause failed");
    assert!(stdout.contains("paused"));
    assert!(stdout.contains(":dog2:"));

    // Second pause is rejected and not persisted.
    let (stdout, _, code) = run_cli(&["settings", "--file", &path, "--user", "ann", "pause"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("cannot pause"));
    assert!(stdout.contains(":x:"));
}

#[test]
fn test_settings_unknown_user_fails() {
    let (_dir, path) = temp_org_file();
    let (_, stderr, code) = run_cli(&["settings", "--file", &path, "--user", "ghost", "pause"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown user"));
}

#[test]
fn test_org_scope_frequency_change() {
    let (_dir, path) = temp_org_file();
    let (stdout, _, code) = run_cli(&[
        "settings", "--file", &path, "--user", "ann", "acme", "4", "hours",
    ]);
    assert_eq!(code, 0, "org frequency change failed");
    assert!(stdout.contains("every 4 hours"));

    let (stdout, _, _) = run_cli(&["org", "status", "--file", &path, "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["hound_frequency"], 4.0);
}

#[test]
fn test_sweep_runs_with_fixed_instant() {
    let (_dir, path) = temp_org_file();
    let (stdout, _, code) = run_cli(&[
        "sweep",
        "--file",
        &path,
        "--at",
        "2030-01-01T12:00:00Z",
        "--seed",
        "7",
    ]);
    assert_eq!(code, 0, "sweep failed");
    assert!(stdout.contains("delivered"));
}

#[test]
fn test_reset_reports_count() {
    let (_dir, path) = temp_org_file();
    let _ = run_cli(&["settings", "--file", &path, "--user", "ann", "pause"]);
    let (stdout, _, code) = run_cli(&["reset", "--file", &path]);
    assert_eq!(code, 0, "reset failed");
    assert!(stdout.contains("hound status for the morning"));
}

#[test]
fn test_add_event_validates_date() {
    let (_dir, path) = temp_org_file();
    let (stdout, _, code) = run_cli(&["org", "add-event", "--file", &path, "07/04/2026", "Launch"]);
    assert_eq!(code, 0, "add-event failed");
    assert!(stdout.contains("Launch"));

    let (_, stderr, code) = run_cli(&["org", "add-event", "--file", &path, "13/45/2026", "Bad"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid date"));
}
