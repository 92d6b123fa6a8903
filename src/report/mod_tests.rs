use super::*;

const TOO_LONG_BODY: &str = r#"{"document": [{"filename": [{"string": "Ensure this field has no more than 256 characters.", "code": "max_length"}]}]}"#;

fn chunk(paths: &[&str]) -> Vec<Scannable> {
    paths.iter().map(|p| Scannable::new(*p)).collect()
}

#[test]
fn single_file_exception_lists_ignored_path() {
    let detail = Detail::new(400, TOO_LONG_BODY);
    let report = render_scan_error(&detail, &chunk(&["/home/user/too/long/file/name"]));

    assert_eq!(
        report,
        "\nScanning failed. Results may be incomplete.\n\
         Add the following files to your ignored_paths:\n\
         - /home/user/too/long/file/name: filename:: [ErrorDetail(string='Ensure this field has no more than 256 characters.', code='max_length')]\n"
    );
}

#[test]
fn too_many_documents_lists_chunk_and_detail() {
    let detail = Detail::new(400, "Too many documents to scan");
    let paths = vec!["/example"; 21];
    let report = render_scan_error(&detail, &chunk(&paths));

    let expected = format!(
        "\nScanning failed. Results may be incomplete.\n\
         The following chunk is affected:\n{}\n400:Too many documents to scan\n",
        paths.join(", ")
    );
    assert_eq!(report, expected);
}

#[test]
fn only_failing_documents_are_listed() {
    let body = r#"{"document": [null, {"filename": ["Bad name."]}, {}]}"#;
    let report = ScanErrorReport::new(&Detail::new(400, body), &chunk(&["/a", "/b", "/c"]));

    match report.body() {
        ReportBody::IgnoredPaths(rejected) => {
            assert_eq!(rejected.len(), 1);
            assert_eq!(rejected[0].0, "/b");
        }
        other => panic!("expected ignored paths, got {other:?}"),
    }
}

#[test]
fn document_errors_beyond_chunk_fall_back_to_chunk_report() {
    let body = r#"{"document": [null, {"filename": ["Bad name."]}]}"#;
    let report = ScanErrorReport::new(&Detail::new(400, body), &chunk(&["/a"]));

    assert!(matches!(report.body(), ReportBody::AffectedChunk { .. }));
}

#[test]
fn empty_chunk_renders_empty_path_line() {
    let report = render_scan_error(&Detail::new(500, "Internal error"), &[]);
    assert_eq!(
        report,
        "\nScanning failed. Results may be incomplete.\nThe following chunk is affected:\n\n500:Internal error\n"
    );
}

#[test]
fn rendering_is_deterministic() {
    let detail = Detail::new(400, TOO_LONG_BODY);
    let docs = chunk(&["/x"]);
    assert_eq!(render_scan_error(&detail, &docs), render_scan_error(&detail, &docs));
}

#[test]
fn write_without_colors_matches_render() {
    let detail = Detail::new(400, "Too many documents to scan");
    let docs = chunk(&["/a", "/b"]);
    let mut out = Vec::new();

    write_scan_error(&mut out, &detail, &docs, false).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), render_scan_error(&detail, &docs));
}

#[test]
fn write_with_colors_highlights_header_only() {
    let detail = Detail::new(400, "Too many documents to scan");
    let mut out = Vec::new();

    write_scan_error(&mut out, &detail, &chunk(&["/a"]), true).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with('\n'));
    assert!(text.contains(ansi::RED));
    assert!(text.ends_with("/a\n400:Too many documents to scan\n"));
}
