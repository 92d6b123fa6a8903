//! Scan failure model: what the scanning API returned and which documents
//! were in flight when it did.

mod validation;

pub use validation::{
    DocumentErrors, ErrorDetail, FieldErrors, is_repr_printable, push_hex_escape, python_repr,
};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Failure returned by the scanning API for one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub status_code: u16,
    /// Raw response body. Either a plain message or a JSON document.
    pub detail: String,
}

impl Detail {
    #[must_use]
    pub fn new(status_code: u16, detail: impl Into<String>) -> Self {
        Self {
            status_code,
            detail: detail.into(),
        }
    }

    /// Per-document validation errors, if the body carries them.
    #[must_use]
    pub fn document_errors(&self) -> Option<DocumentErrors> {
        DocumentErrors::parse(&self.detail)
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.status_code, self.detail)
    }
}

/// One document submitted for scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scannable {
    pub filename: String,
}

impl Scannable {
    #[must_use]
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// A failed scan as read from an outcome file: the API failure plus the chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub status_code: u16,
    pub detail: String,
    #[serde(default)]
    pub chunk: Vec<Scannable>,
}

impl ScanOutcome {
    /// Parse an outcome from its JSON form.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or lacks required fields.
    pub fn from_json(content: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    #[must_use]
    pub fn to_detail(&self) -> Detail {
        Detail::new(self.status_code, self.detail.clone())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
