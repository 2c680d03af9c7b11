//! Defines the command-line arguments and subcommands for the CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::engine::{ConvertOptions, MAX_NESTING_DEPTH};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "ruby-ast-json",
    version,
    about = "Normalize parsed Ruby syntax trees into named-field JSON documents."
)]
pub struct AstJsonArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a single tree document.
    Convert {
        /// The tree document written by the front end.
        #[arg(required = true)]
        document: PathBuf,
        /// Write the result here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Convert every `*.ast.json` document below a directory.
    Batch {
        /// The directory to scan.
        #[arg(required = true)]
        dir: PathBuf,
        /// Where converted documents are written.
        #[arg(long, required = true)]
        out_dir: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// List every known node kind with its category.
    Kinds,
}

/// Output and conversion settings shared by `convert` and `batch`.
#[derive(Debug, Clone, Copy, Args)]
pub struct RenderArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
    /// Indent JSON output.
    #[arg(long)]
    pub pretty: bool,
    /// Nodes at this depth or deeper are replaced by a `nested` stub.
    #[arg(long, default_value_t = MAX_NESTING_DEPTH)]
    pub max_depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl RenderArgs {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            max_depth: self.max_depth,
        }
    }
}
