use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No snapshot recorded for '{key}'")]
    MissingSnapshot { key: String },

    #[error("Snapshot '{key}' does not match")]
    SnapshotMismatch { key: String, diff: String },

    #[error("Duplicate snapshot key '{key}'")]
    DuplicateSnapshot { key: String },

    #[error("Snapshot file parse error at line {line}: {message}")]
    SnapshotParse { line: usize, message: String },

    #[error("Invalid snapshot key: {0}")]
    InvalidSnapshotKey(String),
}

impl SecretGuardError {
    /// Short category name shown as the error headline.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } | Self::FileWrite { .. } => "FileAccess",
            Self::Io(_) => "IO",
            Self::TomlParse(_) => "TomlParse",
            Self::Json(_) => "Json",
            Self::MissingSnapshot { .. } => "MissingSnapshot",
            Self::SnapshotMismatch { .. } => "SnapshotMismatch",
            Self::DuplicateSnapshot { .. } | Self::SnapshotParse { .. } => "SnapshotFile",
            Self::InvalidSnapshotKey(_) => "SnapshotKey",
        }
    }

    /// Primary message, including the underlying I/O cause where there is one.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::FileRead { path, source } => {
                format!("cannot read {}: {source}", path.display())
            }
            Self::FileWrite { path, source } => {
                format!("cannot write {}: {source}", path.display())
            }
            _ => self.to_string(),
        }
    }

    /// Multi-line detail printed under the message, if any.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::SnapshotMismatch { diff, .. } => Some(diff.clone()),
            _ => None,
        }
    }

    /// Actionable hint for the user.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingSnapshot { .. } => {
                Some("record it with `secret-guard snapshot approve` or --update")
            }
            Self::SnapshotMismatch { .. } => {
                Some("review the diff, then re-approve if the change is intended")
            }
            Self::DuplicateSnapshot { .. } => Some("remove one of the duplicated entries"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SecretGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
