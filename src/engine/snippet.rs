//! Code snippet extraction.

use crate::ast::Location;

/// The source text spanned by `location`, flattened onto one line.
///
/// Returns `None` when there is no expression range, or when the range does
/// not describe a valid slice of `source` (out of bounds, reversed, or not on
/// a character boundary).
pub fn extract_code_snippet(location: Option<&Location>, source: &str) -> Option<String> {
    let range = location?.expression?;
    let snippet = source.get(range.begin_pos..range.end_pos)?;
    Some(trim_string(snippet))
}

/// Trims both ends and collapses every ASCII whitespace run, newlines and
/// vertical tabs included, to a single space. Other Unicode spaces are kept.
pub fn trim_string(text: &str) -> String {
    text.trim_end_matches(|c: char| c == '\0' || is_ascii_space(c))
        .split(is_ascii_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
