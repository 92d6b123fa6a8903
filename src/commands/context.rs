use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, SnapshotFileArgs};
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::output::{ColorMode, ErrorOutput};
use crate::scan::ScanOutcome;
use crate::state::discover_project_root;
use crate::{Result, SecretGuardError};

/// Settings shared by every command after config and flags are merged.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    pub color: ColorMode,
    pub project_root: PathBuf,
    pub quiet: bool,
}

impl CommandContext {
    /// Load config (unless `--no-config`) and apply global flags.
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = load_config(cli.config.as_deref(), cli.no_config)?;
        let project_root = discover_project_root(Path::new("."));
        Ok(Self::new(config, cli, project_root))
    }

    #[must_use]
    pub fn new(config: Config, cli: &Cli, project_root: PathBuf) -> Self {
        let color = cli
            .color
            .map_or_else(|| config.report.color.into(), ColorMode::from);
        Self {
            config,
            color,
            project_root,
            quiet: cli.quiet,
        }
    }

    /// Snapshot file for a command: `--file` if given, otherwise the
    /// configured path resolved against the project root.
    #[must_use]
    pub fn snapshot_path(&self, args: &SnapshotFileArgs) -> PathBuf {
        if let Some(file) = &args.file {
            return file.clone();
        }
        let configured = &self.config.snapshot.path;
        if configured.is_absolute() {
            configured.clone()
        } else {
            self.project_root.join(configured)
        }
    }
}

/// Error printer for failures before the config is loaded; honors `--color`.
#[must_use]
pub fn startup_error_output(cli: &Cli) -> ErrorOutput {
    ErrorOutput::new(cli.color.map_or(ColorMode::Auto, ColorMode::from))
}

/// Load configuration honoring `--config` and `--no-config`.
///
/// # Errors
/// Returns an error if the selected config cannot be read or parsed.
pub fn load_config(path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }
    let loader = FileConfigLoader::new();
    let result = match path {
        Some(path) => loader.load_from_path(path)?,
        None => loader.load()?,
    };
    Ok(result.config)
}

/// Read a whole file, reporting the path on failure.
///
/// # Errors
/// Returns `FileRead` if the file cannot be read.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SecretGuardError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a JSON scan outcome file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid outcome.
pub fn read_outcome(path: &Path) -> Result<ScanOutcome> {
    ScanOutcome::from_json(&read_file(path)?)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
