//! Basic CLI E2E tests.
//!
//! Tests run the built binary with HOME pointed at a temporary directory so
//! the user's real config is never touched.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_unwind"))
        .args(args)
        .env("HOME", home)
        .env_remove("UNWIND_ENV")
        .env_remove("UNWIND_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    if let Some(mut pipe) = child.stdin.take() {
        // Commands that ignore stdin may exit before reading it.
        let _ = pipe.write_all(stdin.as_bytes());
    }
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_tools_lists_all_in_order() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["tools"], "");
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("Breathe"));
    assert!(lines[4].contains("[bodyreset]"));
}

#[test]
fn test_reframe_seed_is_reproducible() {
    let home = tempfile::tempdir().unwrap();
    let args = ["reframe", "--seed", "5", "--count", "3"];
    let (first, _, code) = run_cli(home.path(), &args, "");
    assert_eq!(code, 0);
    assert_eq!(first.lines().count(), 3);
    let (second, _, _) = run_cli(home.path(), &args, "");
    assert_eq!(first, second);
}

#[test]
fn test_dump_save_writes_raw_text() {
    let home = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let dir = out.path().to_str().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["dump", "--save", "--dir", dir], "too loud\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Saved to"));

    let entries: Vec<_> = std::fs::read_dir(out.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let path = entries[0].as_ref().unwrap().path();
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("thought-") && name.ends_with(".txt"));
    assert_eq!(name.len(), "thought-YYYY-MM-DD.txt".len());
    assert_eq!(std::fs::read_to_string(path).unwrap(), "too loud\n");
}

#[test]
fn test_dump_blank_is_noop() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["dump"], "   \n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Nothing written."));
}

#[test]
fn test_dump_release() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["dump"], "it is fine\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Released"));
}

#[test]
fn test_ground_collects_answers() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["ground"], "lamp\n\nfan\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("5 things you can see: lamp"));
    assert!(stdout.contains("4 things you can touch: ---"));
    assert!(stdout.contains("3 things you can hear: fan"));
    assert!(stdout.contains("1 thing you can taste: ---"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "breathing.session_secs"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "120");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "breathing.session_secs", "300"], "");
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "breathing.session_secs"], "");
    assert_eq!(stdout.trim(), "300");

    let (_, stderr, code) =
        run_cli(home.path(), &["config", "set", "breathing.session_secs", "90"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_list_prints_dotted_keys() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.tick_interval_ms", "100"], "");
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"], "");
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "breathing.session_secs = 120",
            "export.directory = null",
            "timer.tick_interval_ms = 100",
        ]
    );
}

#[test]
fn test_breathe_json_runs_to_completion() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["breathe", "--duration", "60", "--speed", "600", "--json"],
        "",
    );
    assert_eq!(code, 0);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines[0]["type"], "TimerStarted");
    assert!(lines.iter().any(|v| v["type"] == "TimerCompleted"));

    let last = lines.last().unwrap();
    assert_eq!(last["status"], "complete");
    assert_eq!(last["cycles_completed"], 4);
    assert_eq!(last["seconds_remaining"], 0);
}

#[test]
fn test_breathe_rejects_unknown_duration() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["breathe", "--duration", "90"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("60, 120, 300"));
}

#[test]
fn test_body_reset_completes() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["body-reset", "--speed", "900"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("Shake it out"));
    assert!(stdout.contains("Body reset complete"));
}
