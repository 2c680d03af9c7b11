//! Shared tree builders for integration tests.
//!
//! Mirrors what the front end hands over: nodes with positional children and,
//! where a test needs them, location maps computed from the source text.

#![allow(dead_code)]

use ruby_ast_json::ast::{Child, Literal, Location, SourceNode, SourceRange};

/// A node child without location.
pub fn node(kind: &str, children: Vec<Child>) -> Child {
    SourceNode::new(kind, children).into()
}

/// A node child spanning `source[begin..end]`, with line/column derived from
/// the offsets.
pub fn located(kind: &str, children: Vec<Child>, source: &str, begin: usize, end: usize) -> Child {
    let (line, column) = line_col(source, begin);
    let (last_line, last_column) = line_col(source, end);
    SourceNode::new(kind, children)
        .with_location(Location::span(
            line,
            column,
            last_line,
            last_column,
            SourceRange::new(begin, end),
        ))
        .into()
}

/// A symbol/identifier literal.
pub fn sym(name: &str) -> Child {
    Literal::from(name).into()
}

/// The `nil` literal (an absent positional child).
pub fn none() -> Child {
    Literal::Nil.into()
}

/// An `int` node.
pub fn int(value: i64) -> Child {
    node("int", vec![Literal::Int(value).into()])
}

/// Unwraps a node child.
pub fn root(child: Child) -> SourceNode {
    match child {
        Child::Node(node) => node,
        Child::Literal(literal) => panic!("expected a node, got {literal:?}"),
    }
}

/// 1-based line, 0-based column of a byte offset.
fn line_col(source: &str, offset: usize) -> (i64, i64) {
    let before = &source[..offset];
    let line = before.matches('\n').count() as i64 + 1;
    let column = before.rfind('\n').map_or(offset, |nl| offset - nl - 1) as i64;
    (line, column)
}
