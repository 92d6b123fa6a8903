use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::output::ColorMode;
use crate::state::DEFAULT_SNAPSHOT_FILE;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version. Absent means current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// `[snapshot]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot file, relative to the project root.
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,

    /// Re-record instead of verifying.
    #[serde(default)]
    pub update: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            update: false,
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_FILE)
}

/// `[report]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub color: ColorSetting,

    #[serde(default)]
    pub stream: ReportStream,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<ColorSetting> for ColorMode {
    fn from(setting: ColorSetting) -> Self {
        match setting {
            ColorSetting::Auto => Self::Auto,
            ColorSetting::Always => Self::Always,
            ColorSetting::Never => Self::Never,
        }
    }
}

/// Where scan-error reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStream {
    #[default]
    Stderr,
    Stdout,
}
