//! End-to-end tests driving the `navi` binary.
//!
//! Covers the pipeline: config → policy → session script → rendered output.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn navi_binary() -> String {
    env!("CARGO_BIN_EXE_navi").to_string()
}

/// A command isolated from the user's config directory and environment.
fn navi(home: &Path) -> Command {
    let mut cmd = Command::new(navi_binary());
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("NAVI_FLOW")
        .env_remove("NAVI_LOCK_DAYS")
        .env_remove("NAVI_HORIZON_DAYS")
        .env_remove("NAVI_UPCOMING_LIMIT")
        .env_remove("RUST_LOG")
        .arg("--today")
        .arg("2024-01-15");
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn navi");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// The example scenarios for today = 2024-01-15, fed through stdin.
#[test]
fn test_session_from_stdin() {
    let temp = TempDir::new().unwrap();
    let mut cmd = navi(temp.path());
    cmd.arg("session");

    let output = run_with_stdin(
        cmd,
        "check 2024-01-16\ncheck 2024-01-18\ncommit 2024-01-16 09:00 17:00\ncommit 2024-01-20 09:00 17:00\nquery 2024-01-20\nquery 2024-01-16\n",
    );
    assert!(
        output.status.success(),
        "session should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(lines[0], "2024-01-16: locked");
    assert_eq!(lines[1], "2024-01-18: editable");
    assert!(lines[2].starts_with("Cannot save: availability for 2024-01-16 is locked"));
    assert_eq!(lines[3], "Saved 2024-01-20: 09:00 - 17:00 (8 hours)");
    assert!(lines.contains(&"2024-01-20: 09:00 - 17:00".to_string()));
    assert!(lines.contains(&"2024-01-16: no hours scheduled".to_string()));
    assert_eq!(
        lines.last().unwrap(),
        "Session complete: 1 saved, 1 rejected, 0 invalid"
    );
}

/// The sign-up flow from a config file narrows the horizon to two weeks.
#[test]
fn test_session_script_with_signup_config() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("navi.toml");
    std::fs::write(&config_path, "flow = \"signup\"\n").unwrap();

    let script_path = temp.path().join("plan.txt");
    std::fs::write(
        &script_path,
        "commit 2024-01-29 06:00 12:00\ncommit 2024-01-30 06:00 12:00\n",
    )
    .unwrap();

    let output = navi(temp.path())
        .arg("--config")
        .arg(&config_path)
        .arg("session")
        .arg("--script")
        .arg(&script_path)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["saved", "upcoming", "rejected", "summary"]);
    assert_eq!(events[2]["kind"], "out_of_range");
    assert_eq!(events[3]["saved"], 1);
}

/// Environment variables override the configured flow.
#[test]
fn test_env_overrides_flow() {
    let temp = TempDir::new().unwrap();
    let output = navi(temp.path())
        .env("NAVI_FLOW", "signup")
        .arg("calendar")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let calendar: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(calendar["horizon_days"], 14);
    assert_eq!(calendar["dates"].as_array().unwrap().len(), 15);
}

/// A lock threshold beyond the horizon is refused at startup.
#[test]
fn test_invalid_policy_fails() {
    let temp = TempDir::new().unwrap();
    let output = navi(temp.path())
        .env("NAVI_LOCK_DAYS", "30")
        .env("NAVI_HORIZON_DAYS", "7")
        .arg("check")
        .arg("tomorrow")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid availability policy"),
        "unexpected stderr: {stderr}"
    );
}

/// An absurd horizon is refused at startup instead of rendering a huge calendar.
#[test]
fn test_huge_horizon_fails() {
    let temp = TempDir::new().unwrap();
    let output = navi(temp.path())
        .env("NAVI_HORIZON_DAYS", "4000000000")
        .arg("calendar")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("exceeds the maximum of 1825 days"),
        "unexpected stderr: {stderr}"
    );
}

/// A missing script file is an error, not an empty session.
#[test]
fn test_missing_script_fails() {
    let temp = TempDir::new().unwrap();
    let output = navi(temp.path())
        .arg("session")
        .arg("--script")
        .arg(temp.path().join("nope.txt"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to open"));
}
