//! End-to-end tests for the calsheet binary
//!
//! ## Exit Code Contract
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Calendar written, or save failure reported |
//! | 1 | Invalid input, or save failure with --strict |

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn calsheet(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calsheet"))
        .current_dir(dir)
        .env_remove("CALSHEET_YEAR")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to execute calsheet")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Generate
// =============================================================================

#[test]
fn no_arguments_writes_timestamped_2025_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Calendar for 2025 saved to: calendar_2025_"));

    let files: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("calendar_2025_"));
    assert!(files[0].ends_with(".xlsx"));
}

#[test]
fn generate_to_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(
        dir.path(),
        &["generate", "--year", "2026", "--mode", "stacked", "--output", "plan.xlsx"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        "Calendar for 2026 saved to: plan.xlsx"
    );
    let bytes = fs::read(dir.path().join("plan.xlsx")).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn top_level_flags_generate_without_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["-y", "2024", "-o", "leap.xlsx"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("leap.xlsx").exists());
}

#[test]
fn year_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_calsheet"))
        .current_dir(dir.path())
        .env("CALSHEET_YEAR", "2030")
        .args(["--output", "env.xlsx"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Calendar for 2030"));
}

#[test]
fn verbose_flag_before_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["-v", "generate", "--output", "v.xlsx"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(dir.path().join("v.xlsx").exists());
    let log = stderr(&output);
    assert!(log.contains("INFO"), "stderr: {log}");
    assert!(log.contains("generating calendar"), "stderr: {log}");
}

#[test]
fn verbose_flag_after_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["generate", "-vv", "--output", "v.xlsx"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("rendered month block"));
}

#[test]
fn quiet_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["--output", "q.xlsx"]);

    assert!(output.status.success());
    assert!(!stderr(&output).contains("generating calendar"));
}

#[test]
fn save_failure_is_reported_with_exit_0() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["--output", "missing/cal.xlsx"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("An error occurred while saving"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn save_failure_exits_1_in_strict_mode() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["generate", "--strict", "--output", "missing/cal.xlsx"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("An error occurred while saving"));
}

#[test]
fn invalid_year_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["--year", "0", "--output", "cal.xlsx"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid year: 0"));
    assert!(!dir.path().join("cal.xlsx").exists());
}

// =============================================================================
// Preview
// =============================================================================

#[test]
fn preview_single_month() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["preview", "--month", "1"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("JANUARY 2025"));
    assert!(text.contains(" Su  Mo  Tu  We  Th  Fr  Sa"));
    assert!(text.contains("  1: Revelion, An nou"));
    assert!(!text.contains("FEBRUARY"));
}

#[test]
fn verbose_preview() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["-v", "preview", "--month", "2"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("FEBRUARY 2025"));
    assert!(stderr(&output).contains("preview"));
}

#[test]
fn preview_whole_year() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["preview", "--year", "2025"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("JANUARY 2025"));
    assert!(text.contains("DECEMBER 2025"));
    assert!(text.contains(" 25: Crăciun"));
}

#[test]
fn preview_json_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["preview", "--year", "2024", "--month", "2", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let february = &value[0];
    assert_eq!(february["year"], 2024);
    assert_eq!(february["month"], 2);
    let weeks = february["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 5);
    assert_eq!(weeks[0][4], 1);
    assert_eq!(weeks[4][4], 29);
    assert!(weeks[4][5].is_null());
}

#[test]
fn preview_rejects_month_13() {
    let dir = tempfile::tempdir().unwrap();
    let output = calsheet(dir.path(), &["preview", "--month", "13"]);

    assert!(!output.status.success());
}
