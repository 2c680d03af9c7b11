//! The command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions: loading tree documents, converting them, and
//! rendering the results.

use std::fs;
use std::path::Path;
use std::process;
use std::sync::Once;

use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::ast::NodeKind;
use crate::cli::args::{AstJsonArgs, Command, RenderArgs};
use crate::diagnostics::TracingSink;
use crate::discovery::{discover_documents, output_path};
use crate::document::TreeDocument;
use crate::errors::{print_error, AstJsonError};

pub mod args;
pub mod output;

/// Environment variable holding the log filter, e.g. `ruby_ast_json=debug`.
pub const LOG_ENV: &str = "RUBY_AST_JSON_LOG";

static INIT: Once = Once::new();

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    init_tracing();
    let args = AstJsonArgs::parse();

    let result = match args.command {
        Command::Convert {
            document,
            output,
            render,
        } => handle_convert(&document, output.as_deref(), &render),
        Command::Batch {
            dir,
            out_dir,
            render,
        } => handle_batch(&dir, &out_dir, &render),
        Command::Kinds => {
            list_kinds();
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

/// Installs the stderr log subscriber. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("ruby_ast_json=warn"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_convert(
    document: &Path,
    output: Option<&Path>,
    render: &RenderArgs,
) -> Result<(), AstJsonError> {
    let doc = TreeDocument::load(document)?;
    let result = doc.convert(render.options(), &TracingSink);
    let text = output::render(result.as_ref(), render)?;
    output::emit(&text, output)
}

/// Outcome of one document in a batch run.
enum BatchOutcome {
    Converted,
    Absent,
    Failed,
}

fn handle_batch(dir: &Path, out_dir: &Path, render: &RenderArgs) -> Result<(), AstJsonError> {
    let documents = discover_documents(dir)?;
    tracing::info!(count = documents.len(), dir = %dir.display(), "discovered tree documents");

    let outcomes: Vec<BatchOutcome> = documents
        .par_iter()
        .map(|path| match convert_one(dir, path, out_dir, render) {
            Ok(true) => BatchOutcome::Converted,
            Ok(false) => BatchOutcome::Absent,
            Err(e) => {
                tracing::error!(document = %path.display(), error = %e, "conversion failed");
                BatchOutcome::Failed
            }
        })
        .collect();

    let count = |wanted: fn(&BatchOutcome) -> bool| outcomes.iter().filter(|o| wanted(o)).count();
    let converted = count(|o| matches!(o, BatchOutcome::Converted));
    let absent = count(|o| matches!(o, BatchOutcome::Absent));
    let failed = count(|o| matches!(o, BatchOutcome::Failed));
    println!("converted {converted}, absent {absent}, failed {failed}");

    if failed > 0 {
        return Err(AstJsonError::BatchFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

/// Converts one document below `root` into the mirrored location under
/// `out_dir`. Returns whether a tree was present.
fn convert_one(
    root: &Path,
    path: &Path,
    out_dir: &Path,
    render: &RenderArgs,
) -> Result<bool, AstJsonError> {
    let doc = TreeDocument::load(path)?;
    let result = doc.convert(render.options(), &TracingSink);
    let text = output::render(result.as_ref(), render)?;
    let target = output_path(root, path, out_dir, render.format.extension());
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| AstJsonError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    output::emit(&text, Some(&target))?;
    Ok(result.is_some())
}

fn list_kinds() {
    for name in NodeKind::KNOWN_NAMES {
        println!("{name}\t{}", NodeKind::from_name(name).category());
    }
}
