//! Location map attached to a node by the front end.
//!
//! Every field is optional: desugared or synthetic nodes routinely lack some or
//! all of them.

use serde::{Deserialize, Serialize};

/// Line/column span plus the overall expression range of a node.
///
/// Lines are 1-based and columns 0-based, as reported by the front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_line: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_column: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<SourceRange>,
}

/// Absolute byte offsets `[begin_pos, end_pos)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub begin_pos: usize,
    pub end_pos: usize,
}

impl Location {
    /// Builds a fully populated location.
    pub fn span(line: i64, column: i64, last_line: i64, last_column: i64, range: SourceRange) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
            last_line: Some(last_line),
            last_column: Some(last_column),
            expression: Some(range),
        }
    }
}

impl SourceRange {
    pub fn new(begin_pos: usize, end_pos: usize) -> Self {
        Self { begin_pos, end_pos }
    }
}
