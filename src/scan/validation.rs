use std::fmt::{self, Write};

use indexmap::IndexMap;
use serde::Deserialize;

/// Code assigned to messages that arrive as bare strings.
const DEFAULT_CODE: &str = "invalid";

/// Quote `s` the way a Python `repr()` of a `str` does.
///
/// Single quotes unless the text holds a single quote and no double quote.
#[must_use]
pub fn python_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if !is_repr_printable(c) => push_hex_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Whether `repr()` writes `c` unescaped.
///
/// Control, format, separator (other than space), surrogate and
/// private-use characters are escaped. Unassigned code points count as
/// printable.
#[must_use]
pub fn is_repr_printable(c: char) -> bool {
    !matches!(
        c as u32,
        0x00..=0x1f
            | 0x7f..=0xa0
            | 0xad
            | 0x0600..=0x0605
            | 0x061c
            | 0x06dd
            | 0x070f
            | 0x08e2
            | 0x1680
            | 0x180e
            | 0x2000..=0x200f
            | 0x2028..=0x202f
            | 0x205f..=0x2064
            | 0x2066..=0x206f
            | 0x3000
            | 0xe000..=0xf8ff
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0x110bd
            | 0x110cd
            | 0x13430..=0x1343f
            | 0x1bca0..=0x1bca3
            | 0x1d173..=0x1d17a
            | 0xe0001
            | 0xe0020..=0xe007f
            | 0xf0000..
    )
}

/// Append `c` as a `\xNN`, `\uNNNN` or `\UNNNNNNNN` escape.
pub fn push_hex_escape(out: &mut String, c: char) {
    let code = c as u32;
    let _ = if code <= 0xff {
        write!(out, "\\x{code:02x}")
    } else if code <= 0xffff {
        write!(out, "\\u{code:04x}")
    } else {
        write!(out, "\\U{code:08x}")
    };
}

/// A single field-validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub string: String,
    pub code: String,
}

impl ErrorDetail {
    #[must_use]
    pub fn new(string: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErrorDetail(string={}, code={})",
            python_repr(&self.string),
            python_repr(&self.code)
        )
    }
}

/// Validation messages grouped by field, in the order the API sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: IndexMap<String, Vec<ErrorDetail>>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to `field`.
    pub fn push(&mut self, field: impl Into<String>, detail: ErrorDetail) {
        self.fields.entry(field.into()).or_default().push(detail);
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, detail: ErrorDetail) -> Self {
        self.push(field, detail);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[ErrorDetail]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ErrorDetail])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, details)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}:: [")?;
            for (j, detail) in details.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{detail}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMessage {
    Text(String),
    Detail {
        string: String,
        #[serde(default = "default_code")]
        code: String,
    },
}

fn default_code() -> String {
    DEFAULT_CODE.to_string()
}

impl From<RawMessage> for ErrorDetail {
    fn from(raw: RawMessage) -> Self {
        match raw {
            RawMessage::Text(string) => Self::new(string, DEFAULT_CODE),
            RawMessage::Detail { string, code } => Self::new(string, code),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMessages {
    Many(Vec<RawMessage>),
    One(RawMessage),
}

#[derive(Deserialize)]
struct DocumentPayload {
    document: Vec<Option<IndexMap<String, RawMessages>>>,
}

/// Validation errors for each position of a chunk.
///
/// Built from a response body shaped like
/// `{"document": [null, {"filename": [{"string": "...", "code": "..."}]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentErrors {
    entries: Vec<FieldErrors>,
}

impl DocumentErrors {
    #[must_use]
    pub const fn from_entries(entries: Vec<FieldErrors>) -> Self {
        Self { entries }
    }

    /// Parse a response body. Returns `None` when the body is not a JSON
    /// object with a `document` array.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let payload: DocumentPayload = serde_json::from_str(body).ok()?;
        let entries = payload
            .document
            .into_iter()
            .map(|entry| {
                let mut errors = FieldErrors::new();
                for (field, messages) in entry.unwrap_or_default() {
                    let messages = match messages {
                        RawMessages::Many(many) => many,
                        RawMessages::One(one) => vec![one],
                    };
                    for message in messages {
                        errors.push(field.clone(), message.into());
                    }
                }
                errors
            })
            .collect();
        Some(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Positions that carry at least one message, paired with their errors.
    pub fn failing(&self) -> impl Iterator<Item = (usize, &FieldErrors)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, errors)| !errors.is_empty())
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
