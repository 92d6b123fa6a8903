//! Reader and writer for snapshot fixture files.
//!
//! ```text
//! # snapshottest: v1 - https://goo.gl/zC4yUc
//!
//! from snapshottest import Snapshot
//!
//!
//! snapshots = Snapshot()
//!
//! snapshots['test_name[label] 1'] = '''
//! multi-line value
//! '''
//! ```

use std::fmt::Write;

use crate::scan::{is_repr_printable, push_hex_escape, python_repr};
use crate::{Result, SecretGuardError};

/// Preamble written before the first entry.
pub const FILE_HEADER: &str = "# snapshottest: v1 - https://goo.gl/zC4yUc\n\n\
    from snapshottest import Snapshot\n\n\n\
    snapshots = Snapshot()\n";

const ENTRY_PREFIX: &str = "snapshots[";
const TRIPLE_SINGLE: &str = "'''";
const TRIPLE_DOUBLE: &str = "\"\"\"";

/// Serialize entries, in the order given, into fixture file text.
pub fn write_snapshots<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::from(FILE_HEADER);
    for (key, value) in entries {
        out.push('\n');
        let _ = writeln!(
            out,
            "{ENTRY_PREFIX}{}] = {}",
            python_repr(key),
            value_literal(value)
        );
    }
    out
}

fn value_literal(value: &str) -> String {
    if value.contains('\n') {
        format!("{TRIPLE_SINGLE}{}{TRIPLE_SINGLE}", escape_triple_quoted(value))
    } else {
        python_repr(value)
    }
}

/// Escape text for a `'''` literal.
///
/// Newlines and tabs stay raw; carriage returns and other non-printable
/// characters are escaped so universal-newline readers see the same text.
/// Quote runs of three or more, and a run that ends the text, are escaped so
/// they cannot close the literal early.
fn escape_triple_quoted(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                out.push_str("\\\\");
                i += 1;
            }
            '\'' => {
                let run = chars[i..].iter().take_while(|c| **c == '\'').count();
                let escape = run >= 3 || i + run == chars.len();
                for _ in 0..run {
                    if escape {
                        out.push('\\');
                    }
                    out.push('\'');
                }
                i += run;
            }
            '\r' => {
                out.push_str("\\r");
                i += 1;
            }
            c if c != '\n' && c != '\t' && !is_repr_printable(c) => {
                push_hex_escape(&mut out, c);
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Parse fixture file text into `(key, value)` pairs in file order.
///
/// # Errors
/// Returns `SnapshotParse` with a 1-based line number for malformed input.
pub fn parse_snapshots(content: &str) -> Result<Vec<(String, String)>> {
    let mut cursor = Cursor::new(content);
    let mut entries = Vec::new();

    while !cursor.at_end() {
        let line_start = cursor.line;
        let rest = cursor.rest_of_line();
        let trimmed = rest.trim();

        if is_ignorable(trimmed) {
            cursor.skip_line();
            continue;
        }
        if !trimmed.starts_with(ENTRY_PREFIX) {
            return Err(parse_error(line_start, format!("unexpected statement: {trimmed}")));
        }

        cursor.skip_whitespace_inline();
        cursor.expect(ENTRY_PREFIX)?;
        let key = cursor.read_string_literal()?;
        cursor.skip_whitespace_inline();
        cursor.expect("]")?;
        cursor.skip_whitespace_inline();
        cursor.expect("=")?;
        cursor.skip_whitespace_inline();
        let value = cursor.read_string_literal()?;
        cursor.expect_line_end()?;

        entries.push((key, value));
    }

    Ok(entries)
}

fn is_ignorable(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("from ")
        || line.starts_with("import ")
        || line.replace(' ', "") == "snapshots=Snapshot()"
}

fn parse_error(line: usize, message: impl Into<String>) -> SecretGuardError {
    SecretGuardError::SnapshotParse {
        line,
        message: message.into(),
    }
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Cursor {
    fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut idx = self.pos;
        for c in s.chars() {
            if self.chars.get(idx) != Some(&c) {
                return false;
            }
            idx += 1;
        }
        true
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn rest_of_line(&self) -> String {
        self.chars[self.pos..]
            .iter()
            .take_while(|c| **c != '\n')
            .collect()
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_whitespace_inline(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.advance();
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.starts_with(token) {
            self.advance_by(token.chars().count());
            Ok(())
        } else {
            Err(parse_error(self.line, format!("expected `{token}`")))
        }
    }

    fn expect_line_end(&mut self) -> Result<()> {
        self.skip_whitespace_inline();
        match self.peek() {
            None => Ok(()),
            Some('\n') => {
                self.advance();
                Ok(())
            }
            Some('\r') => {
                self.advance();
                if self.peek() == Some('\n') {
                    self.advance();
                }
                Ok(())
            }
            Some(c) => Err(parse_error(
                self.line,
                format!("unexpected `{c}` after value"),
            )),
        }
    }

    /// Read a `'...'`, `"..."`, `'''...'''` or `"""..."""` literal.
    fn read_string_literal(&mut self) -> Result<String> {
        let start_line = self.line;
        let (terminator, multiline) = if self.starts_with(TRIPLE_SINGLE) {
            (TRIPLE_SINGLE, true)
        } else if self.starts_with(TRIPLE_DOUBLE) {
            (TRIPLE_DOUBLE, true)
        } else if self.peek() == Some('\'') {
            ("'", false)
        } else if self.peek() == Some('"') {
            ("\"", false)
        } else {
            return Err(parse_error(self.line, "expected a string literal"));
        };
        self.advance_by(terminator.len());

        let mut out = String::new();
        loop {
            if self.starts_with(terminator) {
                self.advance_by(terminator.len());
                return Ok(out);
            }
            match self.advance() {
                None => return Err(parse_error(start_line, "unterminated string literal")),
                Some('\n') if !multiline => {
                    return Err(parse_error(start_line, "unterminated string literal"));
                }
                // universal newlines: `\r\n` and a lone `\r` both read as `\n`
                Some('\r') => {
                    if !multiline {
                        return Err(parse_error(start_line, "unterminated string literal"));
                    }
                    if self.peek() == Some('\n') {
                        self.advance();
                    }
                    out.push('\n');
                }
                Some('\\') => self.read_escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn read_escape(&mut self, out: &mut String) -> Result<()> {
        let line = self.line;
        let Some(c) = self.advance() else {
            return Err(parse_error(line, "dangling escape at end of file"));
        };
        match c {
            '\\' | '\'' | '"' => out.push(c),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            // line continuation
            '\n' => {}
            '\r' => {
                if self.peek() == Some('\n') {
                    self.advance();
                }
            }
            'x' => out.push(self.read_hex_escape(line, 'x', 2)?),
            'u' => out.push(self.read_hex_escape(line, 'u', 4)?),
            'U' => out.push(self.read_hex_escape(line, 'U', 8)?),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            self.advance();
                        }
                        None => break,
                    }
                }
                let decoded = char::from_u32(code)
                    .ok_or_else(|| parse_error(line, format!("invalid octal escape `{code:o}`")))?;
                out.push(decoded);
            }
            // `\N{...}` needs the Unicode name table; kept verbatim like unknown escapes
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    /// Read exactly `digits` hex digits after `\x`, `\u` or `\U`.
    fn read_hex_escape(&mut self, line: usize, kind: char, digits: usize) -> Result<char> {
        let hex: String = self.chars[self.pos..]
            .iter()
            .take(digits)
            .take_while(|c| c.is_ascii_hexdigit())
            .collect();
        if hex.len() != digits {
            return Err(parse_error(line, format!("truncated \\{kind} escape `{hex}`")));
        }
        self.advance_by(digits);
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| parse_error(line, format!("invalid \\{kind} escape `{hex}`")))
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
