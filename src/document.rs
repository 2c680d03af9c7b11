//! Tree documents: the hand-off format between the parsing front end and the
//! engine.
//!
//! The front end writes one JSON document per source file:
//!
//! ```json
//! { "file_path": "app/models/user.rb", "source": "...", "tree": { "type": "class", ... } }
//! ```
//!
//! `tree` is `null` when the front end could not parse the file. Such a file
//! has no result; the engine is never invoked for it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ast::Child;
use crate::diagnostics::DiagnosticSink;
use crate::engine::{ConversionContext, ConvertOptions};
use crate::errors::AstJsonError;
use crate::normalized::OutputNode;

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeDocument {
    /// Path of the original source file, used for diagnostics only.
    #[serde(default)]
    pub file_path: Option<String>,
    /// The full source text the tree's offsets refer to.
    pub source: String,
    #[serde(default)]
    pub tree: Option<Child>,
}

impl TreeDocument {
    /// Decodes a document from its JSON text.
    ///
    /// Every tree level costs two JSON nesting levels, so serde_json's default
    /// recursion limit is lifted; the stack grows on demand instead.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, AstJsonError> {
        let mut de = serde_json::Deserializer::from_str(text);
        de.disable_recursion_limit();
        let doc = Self::deserialize(serde_stacker::Deserializer::new(&mut de))
            .and_then(|doc| de.end().map(|()| doc))
            .map_err(|e| AstJsonError::decode(path, text, &e))?;
        Ok(doc)
    }

    /// Reads and decodes a document from disk.
    pub fn load(path: &Path) -> Result<Self, AstJsonError> {
        let text = fs::read_to_string(path).map_err(|source| AstJsonError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Converts the document's tree. `None` when there is no tree or its root
    /// is not a node.
    pub fn convert(&self, options: ConvertOptions, sink: &dyn DiagnosticSink) -> Option<OutputNode> {
        let file = self.file_path.as_deref().unwrap_or("<unknown file>");
        let Some(tree) = &self.tree else {
            tracing::warn!(file, "front end produced no tree; skipping");
            return None;
        };

        let result = ConversionContext::new(&self.source, sink)
            .with_file_path(self.file_path.as_deref())
            .with_options(options)
            .convert(tree, 0);
        if result.is_none() {
            tracing::warn!(file, "tree root is not a node; skipping");
        }
        result
    }
}
