use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::SecretGuardError;
use crate::config::Config;

fn context() -> CommandContext {
    let cli = Cli::parse_from(["secret-guard", "--color", "never", "report", "unused.json"]);
    CommandContext::new(Config::default(), &cli, PathBuf::from("/p"))
}

#[test]
fn report_exits_with_failure_code() {
    let temp = TempDir::new().unwrap();
    let outcome = temp.path().join("outcome.json");
    fs::write(
        &outcome,
        r#"{"status_code": 400, "detail": "Too many documents to scan", "chunk": ["/a"]}"#,
    )
    .unwrap();
    let args = ReportArgs {
        outcome,
        stdout: true,
    };

    assert_eq!(run_report_impl(&args, &context()).unwrap(), EXIT_FAILURE);
}

#[test]
fn report_missing_outcome_is_error() {
    let args = ReportArgs {
        outcome: PathBuf::from("/does/not/exist.json"),
        stdout: false,
    };
    let err = run_report_impl(&args, &context()).unwrap_err();
    assert!(matches!(err, SecretGuardError::FileRead { .. }));
}

#[test]
fn report_invalid_json_is_error() {
    let temp = TempDir::new().unwrap();
    let outcome = temp.path().join("outcome.json");
    fs::write(&outcome, "not json").unwrap();
    let args = ReportArgs {
        outcome,
        stdout: false,
    };

    let err = run_report_impl(&args, &context()).unwrap_err();
    assert!(matches!(err, SecretGuardError::Json(_)));
}
