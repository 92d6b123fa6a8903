use super::*;

#[test]
fn display_with_label() {
    let key = SnapshotKey::new("test_handle_scan_error", Some("single file exception"), 1);
    assert_eq!(
        key.to_string(),
        "test_handle_scan_error[single file exception] 1"
    );
}

#[test]
fn display_without_label() {
    let key = SnapshotKey::new("test_report", None, 3);
    assert_eq!(key.to_string(), "test_report 3");
    assert_eq!(key.case(), "test_report");
}

#[test]
fn parse_with_label() {
    let key: SnapshotKey = "test_handle_scan_error[too many documents] 1".parse().unwrap();
    assert_eq!(key.test, "test_handle_scan_error");
    assert_eq!(key.label.as_deref(), Some("too many documents"));
    assert_eq!(key.index, 1);
}

#[test]
fn parse_label_with_brackets() {
    let key: SnapshotKey = "test_x[a[b] c] 12".parse().unwrap();
    assert_eq!(key.label.as_deref(), Some("a[b] c"));
    assert_eq!(key.index, 12);
}

#[test]
fn parse_without_label() {
    let key: SnapshotKey = "test_report 2".parse().unwrap();
    assert_eq!(key, SnapshotKey::new("test_report", None, 2));
}

#[test]
fn parse_rejects_missing_index() {
    assert!("test_report".parse::<SnapshotKey>().is_err());
    assert!("test_report[x]".parse::<SnapshotKey>().is_err());
}

#[test]
fn parse_rejects_zero_index() {
    let err = "test_report 0".parse::<SnapshotKey>().unwrap_err();
    assert!(matches!(err, SecretGuardError::InvalidSnapshotKey(_)));
}

#[test]
fn display_and_parse_agree() {
    let key = SnapshotKey::new("test_y", Some("case"), 4);
    assert_eq!(key.to_string().parse::<SnapshotKey>().unwrap(), key);
}
