//! Input tree model handed over by the Ruby parsing front end.
//!
//! Nodes mirror the shape the `parser` gem produces: a kind tag, an ordered list
//! of positional children and an optional location map. A child is either a
//! nested node or an opaque literal (symbol name, number, string, `nil`, ...).
//! Trees are read-only to the conversion engine.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

pub mod kind;
pub mod location;
pub mod value;

pub use kind::{Category, NodeKind};
pub use location::{Location, SourceRange};
pub use value::Literal;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A single syntax node as produced by the front end.
///
/// # Examples
///
/// ```rust
/// use ruby_ast_json::ast::{Child, Literal, NodeKind, SourceNode};
/// let node = SourceNode::new("lvar", vec![Literal::from("x").into()]);
/// assert_eq!(node.kind, NodeKind::Lvar);
/// assert!(matches!(node.children[0], Child::Literal(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// A positional child: another node, or a literal passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Node(SourceNode),
    Literal(Literal),
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl SourceNode {
    /// Creates a node without location metadata.
    pub fn new(kind: impl Into<NodeKind>, children: Vec<Child>) -> Self {
        Self {
            kind: kind.into(),
            children,
            location: None,
        }
    }

    /// Attaches a location map to this node.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl Child {
    /// Returns the node if this child is one.
    pub fn as_node(&self) -> Option<&SourceNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Literal(_) => None,
        }
    }
}

impl From<SourceNode> for Child {
    fn from(node: SourceNode) -> Self {
        Child::Node(node)
    }
}

impl From<Literal> for Child {
    fn from(literal: Literal) -> Self {
        Child::Literal(literal)
    }
}
