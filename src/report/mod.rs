//! Human-readable report for a failed scan.
//!
//! Format:
//! ```text
//!
//! Scanning failed. Results may be incomplete.
//! Add the following files to your ignored_paths:
//! - <path>: <field errors>
//! ```
//! or, when the failure concerns the chunk as a whole:
//! ```text
//!
//! Scanning failed. Results may be incomplete.
//! The following chunk is affected:
//! <path>, <path>, ...
//! <status_code>:<detail>
//! ```

use std::fmt;
use std::io::Write;

use crate::output::ansi;
use crate::scan::{Detail, FieldErrors, Scannable};

pub const HEADER: &str = "Scanning failed. Results may be incomplete.";
pub const IGNORED_PATHS_INTRO: &str = "Add the following files to your ignored_paths:";
pub const AFFECTED_CHUNK_INTRO: &str = "The following chunk is affected:";

/// What the report says after the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBody {
    /// Individual documents were rejected; each should be ignored.
    IgnoredPaths(Vec<(String, FieldErrors)>),
    /// The chunk was rejected as a whole.
    AffectedChunk { paths: Vec<String>, detail: Detail },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanErrorReport {
    body: ReportBody,
}

impl ScanErrorReport {
    /// Classify a chunk failure.
    ///
    /// Per-document errors in the response body win when at least one of them
    /// maps onto a document of the chunk; anything else reports the chunk.
    #[must_use]
    pub fn new(detail: &Detail, chunk: &[Scannable]) -> Self {
        if let Some(documents) = detail.document_errors() {
            let rejected: Vec<_> = documents
                .failing()
                .filter_map(|(index, errors)| {
                    chunk
                        .get(index)
                        .map(|doc| (doc.filename.clone(), errors.clone()))
                })
                .collect();
            if !rejected.is_empty() {
                return Self {
                    body: ReportBody::IgnoredPaths(rejected),
                };
            }
            log::debug!(
                "document errors did not match any of {} chunk entries",
                chunk.len()
            );
        }

        Self {
            body: ReportBody::AffectedChunk {
                paths: chunk.iter().map(|doc| doc.filename.clone()).collect(),
                detail: detail.clone(),
            },
        }
    }

    #[must_use]
    pub const fn body(&self) -> &ReportBody {
        &self.body
    }

    fn write_body(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match &self.body {
            ReportBody::IgnoredPaths(rejected) => {
                writeln!(f, "{IGNORED_PATHS_INTRO}")?;
                for (path, errors) in rejected {
                    writeln!(f, "- {path}: {errors}")?;
                }
            }
            ReportBody::AffectedChunk { paths, detail } => {
                writeln!(f, "{AFFECTED_CHUNK_INTRO}")?;
                writeln!(f, "{}", paths.join(", "))?;
                writeln!(f, "{detail}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScanErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{HEADER}")?;
        self.write_body(f)
    }
}

/// Render the report text for a failed chunk.
#[must_use]
pub fn render_scan_error(detail: &Detail, chunk: &[Scannable]) -> String {
    ScanErrorReport::new(detail, chunk).to_string()
}

/// Write the report for a failed chunk, optionally highlighting the header.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_scan_error<W: Write>(
    w: &mut W,
    detail: &Detail,
    chunk: &[Scannable],
    use_colors: bool,
) -> std::io::Result<()> {
    let report = ScanErrorReport::new(detail, chunk);
    if !use_colors {
        return write!(w, "{report}");
    }

    let mut body = String::new();
    // Writing into a String cannot fail.
    let _ = report.write_body(&mut body);
    writeln!(w)?;
    writeln!(w, "{}{}{HEADER}{}", ansi::BOLD, ansi::RED, ansi::RESET)?;
    write!(w, "{body}")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
