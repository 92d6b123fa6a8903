//! Scan-error reports checked against the recorded snapshot fixture through
//! the library API, one assertion per parametrized case.

mod common;

use secret_guard::report::render_scan_error;
use secret_guard::scan::{Detail, ErrorDetail, FieldErrors, Scannable};
use secret_guard::snapshot::{SnapshotMode, SnapshotSession, SnapshotStore};

use common::SCAN_ERROR_FIXTURE;

fn verify_session() -> SnapshotSession {
    let store = SnapshotStore::parse(SCAN_ERROR_FIXTURE).expect("fixture should parse");
    SnapshotSession::new(store, SnapshotMode::Verify)
}

fn single_file_exception() -> (Detail, Vec<Scannable>) {
    let errors = FieldErrors::new().with(
        "filename",
        ErrorDetail::new(
            "Ensure this field has no more than 256 characters.",
            "max_length",
        ),
    );
    let body = format!(
        r#"{{"document": [{{"filename": [{{"string": "{}", "code": "{}"}}]}}]}}"#,
        "Ensure this field has no more than 256 characters.", "max_length"
    );
    assert_eq!(
        errors.to_string(),
        "filename:: [ErrorDetail(string='Ensure this field has no more than 256 characters.', code='max_length')]"
    );
    (
        Detail::new(400, body),
        vec![Scannable::new("/home/user/too/long/file/name")],
    )
}

fn too_many_documents() -> (Detail, Vec<Scannable>) {
    (
        Detail::new(400, "Too many documents to scan"),
        (0..21).map(|_| Scannable::new("/example")).collect(),
    )
}

#[test]
fn test_handle_scan_error() {
    let session = verify_session();
    let cases = [
        ("single file exception", single_file_exception()),
        ("too many documents", too_many_documents()),
    ];

    for (label, (detail, chunk)) in cases {
        let rendered = render_scan_error(&detail, &chunk);
        let key = session
            .assert_match("test_handle_scan_error", Some(label), &rendered)
            .unwrap_or_else(|e| panic!("{label}: {e}"));
        assert_eq!(key.index, 1);
    }

    assert!(session.unused_keys().is_empty());
}

#[test]
fn rerendering_is_byte_identical() {
    let (detail, chunk) = too_many_documents();
    let first = render_scan_error(&detail, &chunk);
    let second = render_scan_error(&detail, &chunk);
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn changed_message_is_detected() {
    let session = verify_session();
    let (_, chunk) = too_many_documents();
    let rendered = render_scan_error(&Detail::new(413, "Payload too large"), &chunk);

    let err = session
        .assert_match("test_handle_scan_error", Some("too many documents"), &rendered)
        .unwrap_err();

    assert!(err.detail().unwrap().contains("+413:Payload too large"));
}
