//! Approved-output snapshots: keys, the fixture file codec, the store and
//! per-run sessions.

mod diff;
pub mod format;
mod key;
mod session;
mod store;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub use diff::line_diff;
pub use key::SnapshotKey;
pub use session::{SessionSummary, SnapshotMode, SnapshotSession, UPDATE_ENV_VAR};
pub use store::SnapshotStore;

use crate::state::is_snapshot_file;

/// Snapshot files under `root`, sorted. A file path is returned as-is.
#[must_use]
pub fn find_snapshot_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_snapshot_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}
