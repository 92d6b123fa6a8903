use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "secret-guard")]
#[command(author, version, about = "Scan-error reports and snapshot fixtures for secret scanning")]
#[command(long_about = "Render the report a secret scan prints when it fails, and keep approved \
    copies of such output in snapshot files.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Scan incomplete, or snapshot mismatch\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output (overrides config)
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorChoice>,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the scan-error report for a failed scan outcome
    Report(ReportArgs),

    /// Inspect, check and approve snapshot records
    Snapshot(SnapshotArgs),
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// JSON outcome file: {"status_code": 400, "detail": "...", "chunk": ["path", ...]}
    pub outcome: PathBuf,

    /// Print to stdout instead of the configured stream
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Parser, Debug)]
pub struct SnapshotArgs {
    #[command(subcommand)]
    pub action: SnapshotAction,
}

/// Snapshot file selection shared by snapshot subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct SnapshotFileArgs {
    /// Snapshot file (overrides config `snapshot.path`)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum SnapshotAction {
    /// List snapshot keys in a file or directory
    List {
        /// Snapshot file or directory to walk for snap_*.py files
        path: Option<PathBuf>,

        /// Output format [possible values: text, json]
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a stored value exactly
    Show {
        key: String,

        #[command(flatten)]
        file: SnapshotFileArgs,
    },

    /// Compare a file's content with a stored value
    Check {
        key: String,

        /// File holding the actual output
        actual: PathBuf,

        #[command(flatten)]
        file: SnapshotFileArgs,
    },

    /// Record a file's content as the approved value
    Approve {
        key: String,

        /// File holding the output to approve
        actual: PathBuf,

        #[command(flatten)]
        file: SnapshotFileArgs,
    },

    /// Render the report for an outcome and check it against a stored value
    Verify {
        key: String,

        /// JSON outcome file
        outcome: PathBuf,

        /// Record instead of checking
        #[arg(long)]
        update: bool,

        #[command(flatten)]
        file: SnapshotFileArgs,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
