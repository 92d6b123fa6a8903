use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::SecretGuardError;

static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<test>[^\[\]\s]+)(?:\[(?P<label>.*)\])? (?P<index>[1-9][0-9]*)$")
        .expect("Invalid regex")
});

/// Identifies one recorded snapshot: `<test>[<label>] <index>`.
///
/// `index` counts assertions for the same test and label, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotKey {
    pub test: String,
    pub label: Option<String>,
    pub index: u32,
}

impl SnapshotKey {
    #[must_use]
    pub fn new(test: impl Into<String>, label: Option<&str>, index: u32) -> Self {
        Self {
            test: test.into(),
            label: label.map(str::to_string),
            index,
        }
    }

    /// The test name together with its parametrization, without the index.
    #[must_use]
    pub fn case(&self) -> String {
        match &self.label {
            Some(label) => format!("{}[{label}]", self.test),
            None => self.test.clone(),
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.case(), self.index)
    }
}

impl FromStr for SnapshotKey {
    type Err = SecretGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = KEY_PATTERN
            .captures(s)
            .ok_or_else(|| SecretGuardError::InvalidSnapshotKey(s.to_string()))?;
        let index = caps["index"]
            .parse()
            .map_err(|_| SecretGuardError::InvalidSnapshotKey(s.to_string()))?;
        Ok(Self {
            test: caps["test"].to_string(),
            label: caps.name("label").map(|m| m.as_str().to_string()),
            index,
        })
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
