//! Traversal engine.
//!
//! Walks a [`SourceNode`] tree depth-first and assembles the normalized
//! document bottom-up. For each node the engine resolves location metadata,
//! extracts the code snippet, converts node children (literals pass through
//! untouched) and hands the converted children to the classifier.
//!
//! Nothing here fails on a structurally valid tree. Odd input degrades:
//! missing positions become sentinels, unknown kinds keep their raw children,
//! and nodes beyond the depth limit collapse to a `nested` stub. Each
//! degradation that loses information is reported to the diagnostic sink.

use crate::ast::{Category, Child, SourceNode};
use crate::diagnostics::DiagnosticSink;
use crate::normalized::{Converted, MetaData, OutputNode};

pub mod classify;
pub mod location;
pub mod snippet;

use location::LocationField;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Depth at which nodes are replaced by a `nested` stub.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Tunables for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Nodes at this depth or deeper are truncated.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

// ============================================================================
// CONVERSION CONTEXT
// ============================================================================

/// Per-call conversion state. Borrowed inputs only; nothing outlives the call.
pub struct ConversionContext<'a> {
    pub source: &'a str,
    pub file_path: Option<&'a str>,
    pub sink: &'a dyn DiagnosticSink,
    pub options: ConvertOptions,
}

impl<'a> ConversionContext<'a> {
    pub fn new(source: &'a str, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            source,
            file_path: None,
            sink,
            options: ConvertOptions::default(),
        }
    }

    pub fn with_file_path(mut self, file_path: Option<&'a str>) -> Self {
        self.file_path = file_path;
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Converts a root child. Literals have no document and yield `None`.
    pub fn convert(&self, root: &Child, depth: usize) -> Option<OutputNode> {
        match root {
            Child::Node(node) => Some(self.convert_node(node, depth)),
            Child::Literal(_) => None,
        }
    }

    /// Converts a node known to be a node.
    pub fn convert_node(&self, node: &SourceNode, depth: usize) -> OutputNode {
        let meta_data = self.meta_data(node);

        if depth >= self.options.max_depth {
            self.sink
                .warn(&format!("Reached max JSON depth on a {} node", node.kind));
            return OutputNode::nested(node.kind.clone(), meta_data);
        }

        let children = node
            .children
            .iter()
            .map(|child| match child {
                Child::Node(inner) => Converted::from(self.convert_node(inner, depth + 1)),
                Child::Literal(literal) => Converted::Literal(literal.clone()),
            })
            .collect();

        if node.kind.category() == Category::Fallback {
            self.sink.warn(&format!(
                "Unhandled AST node type: {} - {}",
                node.kind,
                self.file_path.unwrap_or("<unknown file>")
            ));
        }

        OutputNode {
            kind: node.kind.clone(),
            meta_data,
            body: classify::classify(&node.kind, children),
        }
    }

    fn meta_data(&self, node: &SourceNode) -> MetaData {
        let loc = node.location.as_ref();
        let (offset_start, offset_end) = location::byte_offsets(loc);
        MetaData {
            start_line: location::fetch_member(loc, LocationField::Line),
            start_column: location::fetch_member(loc, LocationField::Column),
            end_line: location::fetch_member(loc, LocationField::LastLine),
            end_column: location::fetch_member(loc, LocationField::LastColumn),
            offset_start,
            offset_end,
            code: snippet::extract_code_snippet(loc, self.source),
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Converts `node` into its normalized document.
///
/// `depth` is the depth of `node` itself; pass `0` for a tree root.
/// `file_path` is only used to attribute diagnostics.
///
/// # Examples
///
/// ```rust
/// use ruby_ast_json::ast::{Child, SourceNode};
/// use ruby_ast_json::diagnostics::NullSink;
/// use ruby_ast_json::engine::convert;
///
/// let root = Child::Node(SourceNode::new("nil", vec![]));
/// let doc = convert(&root, "nil", 0, None, &NullSink).unwrap();
/// assert_eq!(serde_json::to_value(&doc).unwrap()["value"], "nil");
/// ```
pub fn convert(
    node: &Child,
    source: &str,
    depth: usize,
    file_path: Option<&str>,
    sink: &dyn DiagnosticSink,
) -> Option<OutputNode> {
    ConversionContext::new(source, sink)
        .with_file_path(file_path)
        .convert(node, depth)
}
