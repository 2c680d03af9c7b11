//! Location resolution.
//!
//! Each line/column field resolves on its own: a node may carry a start line
//! but no end column. Unresolvable position fields read as [`SENTINEL`].
//! Byte offsets read as `None` instead, because they are used for slicing.

use crate::ast::Location;

/// Value of a position field that could not be resolved.
pub const SENTINEL: i64 = -1;

/// Selects one of the four position fields of a [`Location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Line,
    Column,
    LastLine,
    LastColumn,
}

/// Reads one position field, or [`SENTINEL`] when it is unavailable.
pub fn fetch_member(location: Option<&Location>, field: LocationField) -> i64 {
    location
        .and_then(|loc| match field {
            LocationField::Line => loc.line,
            LocationField::Column => loc.column,
            LocationField::LastLine => loc.last_line,
            LocationField::LastColumn => loc.last_column,
        })
        .unwrap_or(SENTINEL)
}

/// Begin/end byte offsets of the node's expression range.
pub fn byte_offsets(location: Option<&Location>) -> (Option<usize>, Option<usize>) {
    match location.and_then(|loc| loc.expression) {
        Some(range) => (Some(range.begin_pos), Some(range.end_pos)),
        None => (None, None),
    }
}
