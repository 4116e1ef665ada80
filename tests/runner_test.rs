// Integration tests: ProcessRunner against real shell children
// Covers exit-code mapping, log file layout, output ordering, and the
// swallow-and-report policy for spawn failures.

use nerfctl::runner::{CommandRunner, Invocation, ProcessRunner};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sh(script: &str, log: &Path) -> Invocation {
    Invocation::new(
        "TEST RUN",
        "sh",
        vec!["-c".to_string(), script.to_string()],
        log,
    )
}

#[test]
fn test_zero_exit_reports_success() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("run.log");

    let record = ProcessRunner::new().run(&sh("echo hello", &log));

    assert!(record.succeeded());
    assert_eq!(record.return_code(), Some(0));
    assert!(record.output().contains("hello"));
}

#[test]
fn test_nonzero_exit_reports_failure() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("run.log");

    let record = ProcessRunner::new().run(&sh("exit 1", &log));

    assert!(!record.succeeded());
    assert_eq!(record.return_code(), Some(1));
}

#[test]
fn test_exit_127_reports_failure() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("run.log");

    let record = ProcessRunner::new().run(&sh("exit 127", &log));

    assert!(!record.succeeded());
    assert_eq!(record.return_code(), Some(127));
}

#[test]
fn test_missing_executable_is_swallowed() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("run.log");
    let invocation = Invocation::new("TEST RUN", "nerfctl-no-such-binary", vec![], &log);

    let record = ProcessRunner::new().run(&invocation);

    assert!(!record.succeeded());
    assert_eq!(record.return_code(), None);
    // The header was already written, so the failure marker lands in the log.
    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("EXCEPTION:"));
}

#[test]
fn test_log_has_header_output_and_footer_in_order() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("run.log");
    // printf keeps the payload tokens out of the Command: header line
    // (the header shows literal \n, not newlines).
    let script = r"printf 'one\n'; printf 'two\n' 1>&2; printf 'three\n'";
    let invocation = sh(script, &log)
        .with_detail("Config", "a.yml")
        .with_env_label("nerfstudio");

    let record = ProcessRunner::new().run(&invocation);
    assert!(record.succeeded());

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.starts_with("=== TEST RUN START ===\n"));
    assert!(contents.contains(&format!("Command: sh -c {script}")));
    assert!(contents.contains("Config: a.yml"));
    assert!(contents.contains("Conda Environment: nerfstudio"));
    assert!(contents.contains("Duration: "));
    assert!(contents.contains("Return code: 0"));

    // stderr merged in, stdout ordering preserved
    assert!(contents.contains("two\n"));
    let one = contents.find("one\n").unwrap();
    let three = contents.find("three\n").unwrap();
    let footer = contents.find("Duration: ").unwrap();
    assert!(one < three);
    assert!(three < footer);
}

#[test]
fn test_duration_tracks_wall_clock() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("run.log");

    let record = ProcessRunner::new().run(&sh("sleep 0.2", &log));

    assert!(record.succeeded());
    assert!(record.duration_seconds() >= 0.15);
    assert!(record.duration_seconds() < 30.0);
}

#[test]
fn test_creates_missing_log_directories() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("a/b/c/run.log");

    let record = ProcessRunner::new().run(&sh("echo nested", &log));

    assert!(record.succeeded());
    assert!(log.exists());
}

#[test]
fn test_output_is_captured_verbatim() {
    let tmp = TempDir::new().unwrap();
    let log = tmp.path().join("run.log");

    let record = ProcessRunner::new().run(&sh("printf 'a\\nb\\nc\\n'", &log));

    assert_eq!(record.output(), "a\nb\nc\n");
}
