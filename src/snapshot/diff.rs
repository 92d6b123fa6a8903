use std::fmt::Write;

use difference::{Changeset, Difference};

/// Line diff of `expected` against `actual`.
///
/// Removed lines start with `-`, added lines with `+`, unchanged with a space.
/// Whitespace-only differences are shown with visible markers for `\r` and
/// trailing spaces so they are not lost in a terminal.
#[must_use]
pub fn line_diff(expected: &str, actual: &str) -> String {
    let changeset = Changeset::new(expected, actual, "\n");
    let mut out = String::new();
    for diff in &changeset.diffs {
        let (marker, text) = match diff {
            Difference::Same(text) => (' ', text),
            Difference::Rem(text) => ('-', text),
            Difference::Add(text) => ('+', text),
        };
        for line in text.split('\n') {
            let _ = writeln!(out, "{marker}{}", make_visible(line, marker != ' '));
        }
    }
    out
}

fn make_visible(line: &str, changed: bool) -> String {
    if !changed {
        return line.to_string();
    }
    let trimmed = line.trim_end_matches(' ');
    let trailing = line.len() - trimmed.len();
    let mut shown = trimmed.replace('\r', "␍");
    shown.extend(std::iter::repeat_n('·', trailing));
    shown
}
