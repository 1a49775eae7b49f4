//! Integration tests for the castplay binary

use assert_cmd::Command;
use predicates::prelude::*;

use super::helpers::{fixtures_dir, temp_config, temp_fixture};

fn castplay() -> Command {
    Command::cargo_bin("castplay").unwrap()
}

#[test]
fn info_reports_v1_recording() {
    castplay()
        .arg("info")
        .arg(fixtures_dir().join("sample_v1.cast"))
        .assert()
        .success()
        .stdout(predicate::str::contains("asciicast v1"))
        .stdout(predicate::str::contains("80x24"))
        .stdout(predicate::str::contains("Events:   4"))
        .stdout(predicate::str::contains("Markers:  0"));
}

#[test]
fn info_counts_markers() {
    castplay()
        .arg("info")
        .arg(fixtures_dir().join("with_markers.cast"))
        .assert()
        .success()
        .stdout(predicate::str::contains("asciicast v2"))
        .stdout(predicate::str::contains("100x30"))
        .stdout(predicate::str::contains("Events:   3"))
        .stdout(predicate::str::contains("Markers:  2"));
}

#[test]
fn dump_prints_output_up_to_time() {
    castplay()
        .args(["dump", "--at", "3"])
        .arg(fixtures_dir().join("sample_v1.cast"))
        .assert()
        .success()
        .stdout("abc");
}

#[test]
fn dump_defaults_to_whole_recording() {
    castplay()
        .arg("dump")
        .arg(fixtures_dir().join("with_markers.cast"))
        .assert()
        .success()
        .stdout("$ ls\r\nfile.txt\r\n$ exit\r\n");
}

#[test]
fn missing_file_fails() {
    castplay()
        .args(["info", "/nonexistent/path/file.cast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to"));
}

#[test]
fn config_show_uses_config_flag() {
    let (_dir, path) = temp_config("[playback]\nseek_step_secs = 1.5\n");
    castplay()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("seek_step_secs = 1.5"));
}

#[test]
fn info_reads_copied_recording() {
    let (temp_dir, path) = temp_fixture("with_markers.cast");
    castplay()
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Title:    markers"));
    drop(temp_dir);
}
