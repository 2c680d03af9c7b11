//! Errors at the I/O surface around the engine.
//!
//! The conversion itself never fails. Everything that can go wrong lives at
//! the edges: reading tree documents, decoding them, encoding results, writing
//! files and walking directories. All of it is reported through
//! [`AstJsonError`], which renders as a `miette` diagnostic in the CLI.

use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, Report, SourceOffset, SourceSpan};
use thiserror::Error;

/// Unified error type for everything outside the conversion core.
#[derive(Debug, Error, Diagnostic)]
pub enum AstJsonError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(ruby_ast_json::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(
        code(ruby_ast_json::io),
        help("check that the output directory exists and is writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tree document: {message}")]
    #[diagnostic(
        code(ruby_ast_json::decode),
        help("a tree document is a JSON object with `source` and `tree` keys")
    )]
    Decode {
        message: String,
        #[source_code]
        document: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("failed to encode output as JSON")]
    #[diagnostic(code(ruby_ast_json::encode))]
    EncodeJson(#[from] serde_json::Error),

    #[error("failed to encode output as YAML")]
    #[diagnostic(code(ruby_ast_json::encode))]
    EncodeYaml(#[from] serde_yaml::Error),

    #[error("{failed} of {total} documents failed to convert")]
    #[diagnostic(
        code(ruby_ast_json::batch),
        help("the failing documents are logged above; the others were written")
    )]
    BatchFailed { failed: usize, total: usize },

    #[error("failed to walk {}", root.display())]
    #[diagnostic(code(ruby_ast_json::discovery))]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl AstJsonError {
    /// Builds a decode error pointing at the line/column `serde_json` reported.
    pub fn decode(path: &Path, text: &str, error: &serde_json::Error) -> Self {
        AstJsonError::Decode {
            message: error.to_string(),
            document: NamedSource::new(path.display().to_string(), text.to_string()),
            span: label_span(text, error.line(), error.column()),
        }
    }
}

/// One-character span at a 1-based line/column, clamped to the text.
fn label_span(text: &str, line: usize, column: usize) -> SourceSpan {
    let offset = SourceOffset::from_location(text, line, column).offset();
    let len = text
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    (offset, len).into()
}

/// Prints an error as a full miette report on stderr.
pub fn print_error(error: AstJsonError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}
