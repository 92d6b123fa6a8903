use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::diff::line_diff;
use super::format::{parse_snapshots, write_snapshots};
use crate::state::atomic_write;
use crate::{Result, SecretGuardError};

/// Approved snapshot values keyed by snapshot key.
///
/// Values are compared byte for byte. Keys iterate in sorted order, which is
/// also the order they are written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotStore {
    records: BTreeMap<String, String>,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from entries, rejecting duplicate keys.
    ///
    /// # Errors
    /// Returns `DuplicateSnapshot` if a key appears twice.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut records = BTreeMap::new();
        for (key, value) in entries {
            if records.contains_key(&key) {
                return Err(SecretGuardError::DuplicateSnapshot { key });
            }
            records.insert(key, value);
        }
        Ok(Self { records })
    }

    /// Parse fixture file text.
    ///
    /// # Errors
    /// Returns an error if the text is malformed or repeats a key.
    pub fn parse(content: &str) -> Result<Self> {
        Self::from_entries(parse_snapshots(content)?)
    }

    /// Load a fixture file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SecretGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(&content)?;
        log::debug!("loaded {} snapshots from {}", store.len(), path.display());
        Ok(store)
    }

    /// Load a fixture file, treating a missing file as an empty store.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("no snapshot file at {}, starting empty", path.display());
            Ok(Self::new())
        }
    }

    /// Write the store to `path` atomically.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        atomic_write(path, &self.to_file_string()).map_err(|source| {
            SecretGuardError::FileWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::debug!("saved {} snapshots to {}", self.len(), path.display());
        Ok(())
    }

    #[must_use]
    pub fn to_file_string(&self) -> String {
        write_snapshots(self.iter())
    }

    /// Stored value for `key`.
    ///
    /// # Errors
    /// Returns `MissingSnapshot` if the key was never approved.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.records
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| SecretGuardError::MissingSnapshot {
                key: key.to_string(),
            })
    }

    /// Insert or overwrite a record. Returns `true` if the stored value changed.
    pub fn update(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let value = value.into();
        let previous = self.records.insert(key.into(), value.clone());
        previous.as_deref() != Some(value.as_str())
    }

    /// Compare `actual` with the stored value, exactly.
    ///
    /// # Errors
    /// Returns `MissingSnapshot` or `SnapshotMismatch` carrying a line diff.
    pub fn assert_matches(&self, key: &str, actual: &str) -> Result<()> {
        let expected = self.get(key)?;
        if expected == actual {
            return Ok(());
        }
        Err(SecretGuardError::SnapshotMismatch {
            key: key.to_string(),
            diff: line_diff(expected, actual),
        })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.records.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
