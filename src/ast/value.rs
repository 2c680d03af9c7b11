//! Opaque literal children.
//!
//! The front end stores symbol names, numbers, strings and `nil` directly in a
//! node's children. The engine never interprets them; they are copied into the
//! output as-is.

use serde::{Deserialize, Serialize};

/// A non-node child value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Nil,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`; tried before `Float` so they stay exact.
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
}

impl Literal {
    /// `false` for `nil` and `false`, `true` for everything else.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Literal::Nil | Literal::Bool(false))
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(small) => Literal::Int(small),
            Err(_) => Literal::UInt(value),
        }
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}
