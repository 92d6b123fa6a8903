//! Project root discovery and on-disk writes for snapshot files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".secret-guard.toml";

/// Snapshot file used when neither the command line nor the config names one.
pub const DEFAULT_SNAPSHOT_FILE: &str = "snapshots/snap_secret_guard.py";

/// Prefix and suffix of snapshot files found when walking a directory.
pub const SNAPSHOT_FILE_PREFIX: &str = "snap_";
pub const SNAPSHOT_FILE_SUFFIX: &str = ".py";

/// Discover the project root by walking up from `start` looking for markers.
///
/// Markers (checked in order at each directory level):
///   1. `.git/` directory
///   2. `.secret-guard.toml`
///
/// Returns `start` if no marker is found.
#[must_use]
pub fn discover_project_root(start: &Path) -> PathBuf {
    let abs_start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    for ancestor in abs_start.ancestors() {
        if ancestor.join(".git").is_dir() {
            return ancestor.to_path_buf();
        }
        if ancestor.join(CONFIG_FILENAME).is_file() {
            return ancestor.to_path_buf();
        }
    }

    abs_start
}

/// Ensure the parent directory exists for a given path.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write `content` to `path` through a sibling temporary file and a rename,
/// so readers never observe a half-written file.
///
/// # Errors
/// Returns an error if the directory, the temporary file or the rename fails.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Whether `path` names a snapshot file (`snap_*.py`).
#[must_use]
pub fn is_snapshot_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(SNAPSHOT_FILE_PREFIX) && n.ends_with(SNAPSHOT_FILE_SUFFIX))
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
