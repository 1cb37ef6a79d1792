//! End-to-end tests for the `club` binary.
//!
//! Each test writes a log to a temp directory and runs the binary with
//! `HOME` pointed there, so no user configuration leaks in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn club_binary() -> String {
    env!("CARGO_BIN_EXE_club").to_string()
}

fn club(home: &Path, args: &[&str]) -> Output {
    Command::new(club_binary())
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("CLUB_TIME_FORMAT")
        .env_remove("CLUB_FIELD_SEPARATOR")
        .env_remove("CLUB_HOURS_SEPARATOR")
        .env_remove("CLUB_CHANNEL_CAPACITY")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run club")
}

fn write_log(temp: &TempDir, contents: &str) -> String {
    let path = temp.path().join("day.txt");
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

const SAMPLE: &str = "\
3
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:45 3 client4
12:33 4 client1
12:43 4 client2
15:52 4 client4
";

const SAMPLE_OUTPUT: &str = "\
09:00
08:48 1 client1
08:48 13 NotOpenYet
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:52 13 ICanWaitNoLonger!
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:35 13 PlaceIsBusy
11:45 3 client4
12:33 4 client1
12:33 12 client4 1
12:43 4 client2
15:52 4 client4
19:00 11 client3
19:00
1 70 05:58
2 30 02:18
3 90 08:01
";

#[test]
fn test_run_prints_transcript_and_revenue() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, SAMPLE);

    let output = club(temp.path(), &["run", &log]);

    assert!(
        output.status.success(),
        "club run should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), SAMPLE_OUTPUT);
}

#[test]
fn test_run_parse_error_prints_only_the_reason() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "3\n09:00 19:00\n10\n08:48 1 client1\n08:49 1 client 2\n");

    let output = club(temp.path(), &["run", &log]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "nothing may be printed on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to parse row 5: invalid client data format for event type"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_run_missing_file() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");

    let output = club(temp.path(), &["run", &missing.to_string_lossy()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("file does not exist"), "unexpected stderr: {stderr}");
}

#[test]
fn test_run_json() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, SAMPLE);

    let output = club(temp.path(), &["run", &log, "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tables"].as_array().unwrap().len(), 3);
    assert_eq!(json["tables"][2]["income"], 90);
    assert_eq!(json["lines"][2], "08:48 13 NotOpenYet");
}

#[test]
fn test_config_file_changes_separator() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "1\n10:00;20:00\n10\n10:00;1;solo\n10:00;2;solo;1\n10:30;4;solo\n");
    let config = temp.path().join("club.toml");
    std::fs::write(&config, "hours_separator = \";\"\nfield_separator = \";\"\n").unwrap();

    let output = club(
        temp.path(),
        &["--config", &config.to_string_lossy(), "run", &log],
    );

    assert!(
        output.status.success(),
        "club run should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "10:00\n10:00;1;solo\n10:00;2;solo;1\n10:30;4;solo\n20:00\n1;10;00:30\n"
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, SAMPLE);

    let output = Command::new(club_binary())
        .env("HOME", temp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env("CLUB_CHANNEL_CAPACITY", "0")
        .args(["run", &log])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "unexpected stderr: {stderr}");
}

#[test]
fn test_check_reports_event_count() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, SAMPLE);

    let output = club(temp.path(), &["check", &log]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.ends_with(": ok, 14 events\n"), "unexpected stdout: {stdout}");
}
