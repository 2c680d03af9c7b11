//! Normalizes parsed Ruby syntax trees into stable, named-field documents.
//!
//! The front end hands over a [`ast::SourceNode`] tree together with the
//! source text; [`engine::convert`] turns it into an [`normalized::OutputNode`]
//! tree that serializes directly to JSON.

pub use crate::engine::{convert, ConvertOptions, MAX_NESTING_DEPTH};
pub use crate::errors::AstJsonError;

pub mod ast;
pub mod cli;
pub mod diagnostics;
pub mod discovery;
pub mod document;
pub mod engine;
pub mod errors;
pub mod normalized;
