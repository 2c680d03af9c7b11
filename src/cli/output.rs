//! Handles all user-facing output for the CLI.
//!
//! Rendering of converted documents to JSON or YAML and writing them to
//! stdout or disk live here, so every command formats results the same way.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::args::{Format, RenderArgs};
use crate::errors::AstJsonError;
use crate::normalized::OutputNode;

/// Renders a conversion result. An absent result renders as `null`.
pub fn render(result: Option<&OutputNode>, settings: &RenderArgs) -> Result<String, AstJsonError> {
    let text = match (settings.format, settings.pretty) {
        (Format::Json, true) => serde_json::to_string_pretty(&result)?,
        (Format::Json, false) => serde_json::to_string(&result)?,
        (Format::Yaml, _) => serde_yaml::to_string(&result)?,
    };
    Ok(text)
}

/// Writes rendered output to `path`, or to stdout when there is none.
pub fn emit(text: &str, path: Option<&Path>) -> Result<(), AstJsonError> {
    match path {
        Some(path) => fs::write(path, with_newline(text)).map_err(|source| AstJsonError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(with_newline(text).as_bytes())
                .map_err(|source| AstJsonError::Write {
                    path: "<stdout>".into(),
                    source,
                })
        }
    }
}

fn with_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}
