#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Recorded fixture holding the two scan-error scenarios.
pub const SCAN_ERROR_FIXTURE: &str = include_str!("../fixtures/snapshots/snap_test_scan_error.py");

pub const SINGLE_FILE_KEY: &str = "test_handle_scan_error[single file exception] 1";
pub const TOO_MANY_DOCUMENTS_KEY: &str = "test_handle_scan_error[too many documents] 1";

/// Outcome that triggers the single-file validation report.
pub const SINGLE_FILE_OUTCOME: &str = r#"{
  "status_code": 400,
  "detail": "{\"document\": [{\"filename\": [{\"string\": \"Ensure this field has no more than 256 characters.\", \"code\": \"max_length\"}]}]}",
  "chunk": ["/home/user/too/long/file/name"]
}"#;

/// Outcome with 21 documents rejected as a batch.
pub fn too_many_documents_outcome() -> String {
    let chunk = vec!["\"/example\""; 21].join(", ");
    format!(
        r#"{{"status_code": 400, "detail": "Too many documents to scan", "chunk": [{chunk}]}}"#
    )
}

/// Temporary directory with helpers for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Copies the recorded scan-error fixture into the temp directory.
    pub fn create_scan_error_snapshots(&self) -> PathBuf {
        self.create_file("snapshots/snap_test_scan_error.py", SCAN_ERROR_FIXTURE)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
