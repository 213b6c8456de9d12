mod common;

use common::{depgraph_cmd, write_report};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_classpath_lists_files_in_report_order() {
    let tmp = TempDir::new().unwrap();
    let report = write_report(tmp.path());

    let output = depgraph_cmd()
        .current_dir(tmp.path())
        .args(["classpath", "--lines"])
        .arg(&report)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("lib-1.0.jar"));
    assert!(lines[1].ends_with("util-1.0.jar"));
}

#[test]
fn test_classpath_joined_by_default() {
    let tmp = TempDir::new().unwrap();
    let report = write_report(tmp.path());

    let separator = if cfg!(windows) { ";" } else { ":" };
    depgraph_cmd()
        .current_dir(tmp.path())
        .arg("classpath")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("lib-1.0.jar{separator}")));
}

#[test]
fn test_classpath_empty_configuration() {
    let tmp = TempDir::new().unwrap();
    let report = write_report(tmp.path());

    depgraph_cmd()
        .current_dir(tmp.path())
        .args(["classpath", "--lines", "-c", "test"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_classpath_unknown_configuration_fails() {
    let tmp = TempDir::new().unwrap();
    let report = write_report(tmp.path());

    depgraph_cmd()
        .current_dir(tmp.path())
        .args(["classpath", "-c", "runtime"])
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtime"))
        .stderr(predicate::str::contains("not found among"));
}

#[test]
fn test_classpath_missing_report_fails() {
    let tmp = TempDir::new().unwrap();

    depgraph_cmd()
        .current_dir(tmp.path())
        .args(["classpath", "missing.json"])
        .assert()
        .failure();
}

#[test]
fn test_classpath_malformed_report_fails() {
    let tmp = TempDir::new().unwrap();
    let report = tmp.path().join("report.json");
    std::fs::write(&report, "{ not json").unwrap();

    depgraph_cmd()
        .current_dir(tmp.path())
        .arg("classpath")
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON report"));
}
