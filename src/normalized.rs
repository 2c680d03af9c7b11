//! Output document model.
//!
//! Every converted node serializes as a JSON object with `type` and `meta_data`
//! first, followed by one of:
//!
//! - the kind's named fields, in the order the classifier assigned them;
//! - a `children` list, for containers and unrecognized kinds;
//! - `"nested": true`, for nodes cut off by the depth guard.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::ast::{Literal, NodeKind};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Position metadata attached to every output node.
///
/// Line/column fields use `-1` when unresolvable; offsets and `code` use `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaData {
    pub start_line: i64,
    pub start_column: i64,
    pub end_line: i64,
    pub end_column: i64,
    pub offset_start: Option<usize>,
    pub offset_end: Option<usize>,
    pub code: Option<String>,
}

/// A converted child: a nested document, a literal passed through, or a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Converted {
    Node(Box<OutputNode>),
    Literal(Literal),
    List(Vec<Converted>),
}

/// What follows `type` and `meta_data` in a node's document.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Fields(Vec<(&'static str, Converted)>),
    Children(Vec<Converted>),
    /// Truncated by the depth guard.
    Nested,
}

/// One node of the normalized document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputNode {
    pub kind: NodeKind,
    pub meta_data: MetaData,
    pub body: Body,
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Converted {
    /// Stand-in for a positional child that does not exist.
    pub fn absent() -> Self {
        Converted::Literal(Literal::Nil)
    }

    /// Whether an optional field should be emitted for this value.
    ///
    /// Mirrors the front end's truthiness: only `nil` and `false` are absent.
    pub fn is_present(&self) -> bool {
        match self {
            Converted::Node(_) | Converted::List(_) => true,
            Converted::Literal(literal) => literal.is_truthy(),
        }
    }

    pub fn as_node(&self) -> Option<&OutputNode> {
        match self {
            Converted::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Converted]> {
        match self {
            Converted::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Converted::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

impl From<OutputNode> for Converted {
    fn from(node: OutputNode) -> Self {
        Converted::Node(Box::new(node))
    }
}

impl From<Literal> for Converted {
    fn from(literal: Literal) -> Self {
        Converted::Literal(literal)
    }
}

impl OutputNode {
    /// The stub emitted in place of a node beyond the depth limit.
    pub fn nested(kind: NodeKind, meta_data: MetaData) -> Self {
        Self {
            kind,
            meta_data,
            body: Body::Nested,
        }
    }

    /// Looks up a named field. Always `None` for `children` and nested bodies.
    pub fn field(&self, name: &str) -> Option<&Converted> {
        match &self.body {
            Body::Fields(fields) => fields
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Field names in emission order.
    pub fn field_names(&self) -> Vec<&'static str> {
        match &self.body {
            Body::Fields(fields) => fields.iter().map(|(key, _)| *key).collect(),
            _ => Vec::new(),
        }
    }

    pub fn children(&self) -> Option<&[Converted]> {
        match &self.body {
            Body::Children(children) => Some(children),
            _ => None,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.body, Body::Nested)
    }
}

// ============================================================================
// SERIALIZATION
// ============================================================================

impl Serialize for OutputNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind.as_str())?;
        map.serialize_entry("meta_data", &self.meta_data)?;
        match &self.body {
            Body::Fields(fields) => {
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
            }
            Body::Children(children) => map.serialize_entry("children", children)?,
            Body::Nested => map.serialize_entry("nested", &true)?,
        }
        map.end()
    }
}
