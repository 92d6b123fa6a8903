use super::*;

const SCAN_ERROR_FIXTURE: &str =
    include_str!("../../tests/fixtures/snapshots/snap_test_scan_error.py");

#[test]
fn parse_recorded_fixture() {
    let entries = parse_snapshots(SCAN_ERROR_FIXTURE).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, "test_handle_scan_error[single file exception] 1");
    assert!(entries[0].1.starts_with("\nScanning failed. Results may be incomplete.\n"));
    assert!(entries[0].1.contains("code='max_length')]"));
    assert_eq!(entries[1].0, "test_handle_scan_error[too many documents] 1");
    assert!(entries[1].1.ends_with("\n400:Too many documents to scan\n"));
}

#[test]
fn writing_parsed_fixture_reproduces_it_byte_for_byte() {
    let entries = parse_snapshots(SCAN_ERROR_FIXTURE).unwrap();
    let written = write_snapshots(entries.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    assert_eq!(written, SCAN_ERROR_FIXTURE);
}

#[test]
fn empty_file_has_only_header() {
    assert_eq!(write_snapshots(std::iter::empty()), FILE_HEADER);
    assert!(parse_snapshots(FILE_HEADER).unwrap().is_empty());
}

#[test]
fn single_line_values_use_plain_literal() {
    let text = write_snapshots([("test_a 1", "it's fine")]);
    assert!(text.contains("snapshots['test_a 1'] = \"it's fine\"\n"));
    let entries = parse_snapshots(&text).unwrap();
    assert_eq!(entries[0].1, "it's fine");
}

#[test]
fn quotes_and_backslashes_survive_triple_quoted_values() {
    let tricky = "\nC:\\path\\file\nthree ''' quotes\ntwo '' quotes\nends with '";
    let text = write_snapshots([("test_b 1", tricky)]);
    let entries = parse_snapshots(&text).unwrap();
    assert_eq!(entries[0].1, tricky);
}

#[test]
fn parse_double_quoted_key_and_triple_double_value() {
    let text = "snapshots[\"test_c[it's] 1\"] = \"\"\"\nline\n\"\"\"\n";
    let entries = parse_snapshots(text).unwrap();
    assert_eq!(entries[0], ("test_c[it's] 1".to_string(), "\nline\n".to_string()));
}

#[test]
fn parse_hex_and_newline_escapes() {
    let text = "snapshots['k 1'] = 'a\\x41\\nb'\n";
    let entries = parse_snapshots(text).unwrap();
    assert_eq!(entries[0].1, "aA\nb");
}

#[test]
fn unterminated_value_reports_start_line() {
    let text = "# header\n\nsnapshots['k 1'] = '''\nnever closed\n";
    let err = parse_snapshots(text).unwrap_err();
    match err {
        SecretGuardError::SnapshotParse { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("unterminated"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unexpected_statement_is_rejected() {
    let err = parse_snapshots("print('hi')\n").unwrap_err();
    assert!(matches!(err, SecretGuardError::SnapshotParse { line: 1, .. }));
}

#[test]
fn trailing_garbage_after_value_is_rejected() {
    let err = parse_snapshots("snapshots['k 1'] = 'v' + 'w'\n").unwrap_err();
    assert!(matches!(err, SecretGuardError::SnapshotParse { line: 1, .. }));
}

#[test]
fn crlf_line_endings_are_accepted() {
    let text = "snapshots = Snapshot()\r\n\r\nsnapshots['k 1'] = 'v'\r\n";
    let entries = parse_snapshots(text).unwrap();
    assert_eq!(entries, vec![("k 1".to_string(), "v".to_string())]);
}

#[test]
fn crlf_fixture_reads_like_lf_fixture() {
    let crlf = SCAN_ERROR_FIXTURE.replace('\n', "\r\n");
    let entries = parse_snapshots(&crlf).unwrap();

    assert_eq!(entries, parse_snapshots(SCAN_ERROR_FIXTURE).unwrap());
    assert!(entries.iter().all(|(_, value)| !value.contains('\r')));
}

#[test]
fn lone_carriage_return_in_triple_quoted_value_is_a_newline() {
    let entries = parse_snapshots("snapshots['k 1'] = '''\ra\rb'''\n").unwrap();
    assert_eq!(entries[0].1, "\na\nb");
}

#[test]
fn carriage_return_in_value_is_written_escaped() {
    let value = "\nwindows\r\nline\n";
    let text = write_snapshots([("test_cr 1", value)]);

    assert!(text.contains("windows\\r\nline"));
    assert_eq!(parse_snapshots(&text).unwrap()[0].1, value);
}

#[test]
fn parse_unicode_and_octal_escapes() {
    let text = "snapshots['k 1'] = 'a\\u200bb\\U0001f600\\101\\0\\a'\n";
    let entries = parse_snapshots(text).unwrap();
    assert_eq!(entries[0].1, "a\u{200b}b\u{1f600}A\0\x07");
}

#[test]
fn truncated_unicode_escape_is_rejected() {
    let err = parse_snapshots("snapshots['k 1'] = '\\u20'\n").unwrap_err();
    assert!(matches!(err, SecretGuardError::SnapshotParse { line: 1, .. }));
}

#[test]
fn non_printable_characters_are_written_as_escapes() {
    let text = write_snapshots([("k 2", "x\u{a0}y\u{200b}z")]);
    assert!(text.contains("snapshots['k 2'] = 'x\\xa0y\\u200bz'\n"));

    let multi = "\nnbsp\u{a0}\n";
    let text = write_snapshots([("k 3", multi)]);
    assert!(text.contains("'''\nnbsp\\xa0\n'''"));
    assert_eq!(parse_snapshots(&text).unwrap()[0].1, multi);
}
