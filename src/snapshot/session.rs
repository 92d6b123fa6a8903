use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{SnapshotKey, SnapshotStore};
use crate::Result;

/// Environment variable that switches a session into re-recording.
pub const UPDATE_ENV_VAR: &str = "SECRET_GUARD_UPDATE_SNAPSHOTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotMode {
    /// Compare against approved values; never write.
    #[default]
    Verify,
    /// Record whatever is asserted.
    Update,
}

impl SnapshotMode {
    /// Resolve the mode from config, letting the environment override it.
    #[must_use]
    pub fn resolve(config_update: bool) -> Self {
        Self::from_env_value(std::env::var(UPDATE_ENV_VAR).ok().as_deref(), config_update)
    }

    #[must_use]
    pub fn from_env_value(value: Option<&str>, config_update: bool) -> Self {
        let update = value.map_or(config_update, |v| {
            matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes")
        });
        if update { Self::Update } else { Self::Verify }
    }
}

/// What a session did, returned by [`SnapshotSession::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub checked: usize,
    pub recorded: usize,
    pub unused: Vec<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    store: SnapshotStore,
    counters: HashMap<String, u32>,
    touched: BTreeSet<String>,
    checked: usize,
    recorded: usize,
}

/// Snapshot assertions for one test run.
///
/// Occurrence indices are assigned per test case in call order, so the second
/// assertion in `test_x[a]` is checked against `test_x[a] 2`.
#[derive(Debug)]
pub struct SnapshotSession {
    mode: SnapshotMode,
    state: Mutex<SessionState>,
}

impl SnapshotSession {
    #[must_use]
    pub fn new(store: SnapshotStore, mode: SnapshotMode) -> Self {
        Self {
            mode,
            state: Mutex::new(SessionState {
                store,
                ..SessionState::default()
            }),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SnapshotMode {
        self.mode
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assert the next snapshot of `test[label]`.
    ///
    /// # Errors
    /// In verify mode, returns `MissingSnapshot` or `SnapshotMismatch`.
    pub fn assert_match(
        &self,
        test: &str,
        label: Option<&str>,
        actual: &str,
    ) -> Result<SnapshotKey> {
        let mut state = self.lock();

        let mut key = SnapshotKey::new(test, label, 0);
        let counter = state.counters.entry(key.case()).or_insert(0);
        *counter += 1;
        key.index = *counter;

        let key_str = key.to_string();
        state.touched.insert(key_str.clone());

        match self.mode {
            SnapshotMode::Verify => {
                state.checked += 1;
                state.store.assert_matches(&key_str, actual)?;
            }
            SnapshotMode::Update => {
                if state.store.update(key_str.clone(), actual) {
                    state.recorded += 1;
                    log::info!("recorded snapshot '{key_str}'");
                }
            }
        }
        Ok(key)
    }

    /// Stored keys that no assertion has reached yet.
    #[must_use]
    pub fn unused_keys(&self) -> Vec<String> {
        let state = self.lock();
        state
            .store
            .keys()
            .filter(|k| !state.touched.contains(*k))
            .map(str::to_string)
            .collect()
    }

    /// End the session, writing `path` if update mode changed anything.
    ///
    /// # Errors
    /// Returns an error if the store cannot be saved.
    pub fn finish(self, path: &Path) -> Result<SessionSummary> {
        let unused = self.unused_keys();
        let state = self.state.into_inner().unwrap_or_else(PoisonError::into_inner);

        if state.recorded > 0 {
            state.store.save(path)?;
        }
        if !unused.is_empty() {
            log::warn!("{} snapshots were not asserted this session", unused.len());
        }

        Ok(SessionSummary {
            checked: state.checked,
            recorded: state.recorded,
            unused,
        })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
