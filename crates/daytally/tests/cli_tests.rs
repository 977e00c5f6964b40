//! End-to-end tests for the daytally binary
//!
//! Each test points the binary at its own config file so the user's real
//! configuration never leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn daytally(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daytally"))
        .env_remove("DAYTALLY_NOTES_DIR")
        .env_remove("DAYTALLY_FORMAT")
        .env_remove("DAYTALLY_LOG")
        .env("DAYTALLY_CONFIG", config)
        .env("DAYTALLY_NO_COLOR", "true")
        .args(args)
        .output()
        .expect("Failed to run daytally")
}

fn workspace() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let days = dir.path().join("days");
    fs::create_dir(&days).unwrap();
    fs::write(
        days.join("2024-09-02.md"),
        "# do it now\n\n\
         - [x] 09:00 - 10:30 Write report #work\n\
         - [ ] 11:00 - 11:30 Review PR #work\n\
         - [x] 14:00 - 14:15 Stretch #health\n\
         random unrelated line\n",
    )
    .unwrap();

    let config = dir.path().join("config.toml");
    fs::write(&config, format!("notes_dir = {:?}\n", days.display().to_string())).unwrap();
    (dir, config)
}

#[test]
fn test_summary_json_from_config() {
    let (_dir, config) = workspace();
    let output = daytally(&config, &["--format", "json", "summary"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_tasks"], 3);
    assert_eq!(value["completed_tasks"], 2);
    assert_eq!(value["categories"]["work"]["completed_time"], 1.5);
    assert_eq!(value["categories"]["health"]["completed_time"], 0.25);
}

#[test]
fn test_default_command_is_summary_table() {
    let (_dir, config) = workspace();
    let output = daytally(&config, &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total tasks:            3"));
    assert!(stdout.contains("66.67%"));
}

#[test]
fn test_notes_dir_flag_overrides_config() {
    let (dir, config) = workspace();
    let empty = dir.path().join("empty");
    fs::create_dir(&empty).unwrap();

    let output = daytally(&config, &["--notes-dir", empty.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No tasks found."));
}

#[test]
fn test_missing_notes_dir_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let output = daytally(&config, &["summary"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("notes_dir is not set"));
}

#[test]
fn test_check_reports_invalid_lines() {
    let (dir, config) = workspace();
    let note = dir.path().join("bad.md");
    fs::write(
        &note,
        "- [x] 09:00 - 10:00 Fine #work\n- [x] 26:00 - 27:00 Broken #work\n",
    )
    .unwrap();

    let output = daytally(&config, &["check", note.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("26:00"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 task line(s) with invalid times"));
}

#[test]
fn test_config_prints_effective_values() {
    let (_dir, config) = workspace();
    let output = daytally(&config, &["--midnight", "zero", "config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("midnight_policy = \"zero\""));
    assert!(stdout.contains("notes_dir"));
}
