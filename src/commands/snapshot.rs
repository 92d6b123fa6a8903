//! Snapshot command: list, show, check, approve and verify snapshot records.
//!
//! `list`, `show`, `check` and `verify` only read snapshot files; `approve`
//! and `verify --update` are the only writers.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::{Cli, SnapshotAction, SnapshotArgs};
use crate::output::{ErrorOutput, OutputFormat};
use crate::report::render_scan_error;
use crate::snapshot::{SnapshotKey, SnapshotMode, SnapshotStore, find_snapshot_files};
use crate::{EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS, Result, SecretGuardError};

use super::context::{CommandContext, read_file, read_outcome, startup_error_output};

/// Run a snapshot subcommand.
#[must_use]
pub fn run_snapshot(args: &SnapshotArgs, cli: &Cli) -> i32 {
    let ctx = match CommandContext::from_cli(cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            startup_error_output(cli).print_crate_error(&e);
            return exit_code_for(&e);
        }
    };
    match run_snapshot_impl(args, &ctx) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            ErrorOutput::new(ctx.color).print_crate_error(&e);
            exit_code_for(&e)
        }
    }
}

/// Mismatches are test failures; everything else is a runtime error.
#[must_use]
pub const fn exit_code_for(err: &SecretGuardError) -> i32 {
    match err {
        SecretGuardError::MissingSnapshot { .. } | SecretGuardError::SnapshotMismatch { .. } => {
            EXIT_FAILURE
        }
        _ => EXIT_CONFIG_ERROR,
    }
}

/// # Errors
/// Returns an error if a snapshot file cannot be read, parsed or written, or
/// if a comparison fails.
pub fn run_snapshot_impl(args: &SnapshotArgs, ctx: &CommandContext) -> Result<i32> {
    match &args.action {
        SnapshotAction::List { path, format } => {
            let root = path
                .clone()
                .unwrap_or_else(|| ctx.snapshot_path(&Default::default()));
            let listing = list_snapshots(&root)?;
            if listing.is_empty() && !ctx.quiet {
                ErrorOutput::new(ctx.color)
                    .print_warning(&format!("no snapshots found at {}", root.display()));
            }
            let mut stdout = std::io::stdout().lock();
            write_listing(&mut stdout, &listing, *format)?;
            Ok(EXIT_SUCCESS)
        }
        SnapshotAction::Show { key, file } => {
            let store = SnapshotStore::load(&ctx.snapshot_path(file))?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(store.get(key)?.as_bytes())?;
            stdout.flush()?;
            Ok(EXIT_SUCCESS)
        }
        SnapshotAction::Check { key, actual, file } => {
            let actual = read_file(actual)?;
            check_value(&ctx.snapshot_path(file), key, &actual)?;
            print_status(ctx, &format!("Snapshot '{key}' matches."));
            Ok(EXIT_SUCCESS)
        }
        SnapshotAction::Approve { key, actual, file } => {
            let actual = read_file(actual)?;
            let changed = approve_value(&ctx.snapshot_path(file), key, &actual)?;
            print_status(ctx, &approve_message(key, changed));
            Ok(EXIT_SUCCESS)
        }
        SnapshotAction::Verify {
            key,
            outcome,
            update,
            file,
        } => {
            let outcome = read_outcome(outcome)?;
            let rendered = render_scan_error(&outcome.to_detail(), &outcome.chunk);
            let path = ctx.snapshot_path(file);
            let mode = if *update {
                SnapshotMode::Update
            } else {
                SnapshotMode::resolve(ctx.config.snapshot.update)
            };
            match mode {
                SnapshotMode::Verify => {
                    check_value(&path, key, &rendered)?;
                    print_status(ctx, &format!("Snapshot '{key}' matches."));
                }
                SnapshotMode::Update => {
                    let changed = approve_value(&path, key, &rendered)?;
                    print_status(ctx, &approve_message(key, changed));
                }
            }
            Ok(EXIT_SUCCESS)
        }
    }
}

fn print_status(ctx: &CommandContext, message: &str) {
    if !ctx.quiet {
        println!("{message}");
    }
}

fn approve_message(key: &str, changed: bool) -> String {
    if changed {
        format!("Recorded snapshot '{key}'.")
    } else {
        format!("Snapshot '{key}' already up to date.")
    }
}

/// Compare `actual` with the record `key` in the snapshot file at `path`.
///
/// # Errors
/// Returns an error for an invalid key, an unreadable file, a missing record
/// or a mismatch.
pub fn check_value(path: &Path, key: &str, actual: &str) -> Result<()> {
    key.parse::<SnapshotKey>()?;
    SnapshotStore::load(path)?.assert_matches(key, actual)
}

/// Record `value` under `key`, creating the snapshot file if needed.
/// Returns `true` if the file changed.
///
/// # Errors
/// Returns an error for an invalid key or if the file cannot be read or written.
pub fn approve_value(path: &Path, key: &str, value: &str) -> Result<bool> {
    key.parse::<SnapshotKey>()?;
    let mut store = SnapshotStore::load_or_default(path)?;
    let changed = store.update(key, value);
    if changed {
        store.save(path)?;
    }
    Ok(changed)
}

/// One listed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedSnapshot {
    pub file: PathBuf,
    pub key: String,
}

/// Keys of every snapshot file at or under `root`.
///
/// # Errors
/// Returns an error if `root` does not exist or a file cannot be parsed.
pub fn list_snapshots(root: &Path) -> Result<Vec<ListedSnapshot>> {
    if !root.exists() {
        return Err(SecretGuardError::FileRead {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
        });
    }

    let mut listing = Vec::new();
    for file in find_snapshot_files(root) {
        let store = SnapshotStore::load(&file)?;
        listing.extend(store.keys().map(|key| ListedSnapshot {
            file: file.clone(),
            key: key.to_string(),
        }));
    }
    Ok(listing)
}

/// Write a listing as text (one key per line, prefixed by the file when
/// several files are listed) or as a JSON array.
///
/// # Errors
/// Returns an error if writing or serialization fails.
pub fn write_listing<W: Write>(
    w: &mut W,
    listing: &[ListedSnapshot],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let multiple_files = listing.windows(2).any(|pair| pair[0].file != pair[1].file);
            for entry in listing {
                if multiple_files {
                    writeln!(w, "{}: {}", entry.file.display(), entry.key)?;
                } else {
                    writeln!(w, "{}", entry.key)?;
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, listing)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
