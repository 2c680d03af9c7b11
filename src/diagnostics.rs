//! Non-fatal diagnostics emitted during conversion.
//!
//! The engine never fails on an odd tree; it degrades and reports. Reports go
//! to a [`DiagnosticSink`] handed to the converter explicitly, so a conversion
//! depends on nothing ambient and can be observed per call in tests.
//!
//! Sinks are shared across threads when several trees convert in parallel, so
//! implementations must be `Send + Sync` and tolerate concurrent writes. No
//! ordering is promised between different trees.

use std::fmt;
use std::sync::{Mutex, PoisonError};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Write-only destination for diagnostics.
///
/// The engine ignores whatever happens inside `emit`; a sink that drops
/// everything is as valid as one that records everything.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, level: Level, message: &str);

    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }
}

// ============================================================================
// SINK IMPLEMENTATIONS
// ============================================================================

/// Forwards diagnostics to `tracing`. This is what the CLI uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!("{message}"),
            Level::Info => tracing::info!("{message}"),
            Level::Warn => tracing::warn!("{message}"),
            Level::Error => tracing::error!("{message}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _level: Level, _message: &str) {}
}

/// Keeps every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded messages at the given level.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|d| d.level == level)
            .map(|d| d.message)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, level: Level, message: &str) {
        // A poisoned lock still holds valid entries; keep appending.
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                level,
                message: message.to_string(),
            });
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_collecting_sink_records_in_order() {
        let sink = CollectingSink::new();
        sink.warn("first");
        sink.emit(Level::Info, "second");
        assert_eq!(
            sink.entries(),
            vec![
                Diagnostic {
                    level: Level::Warn,
                    message: "first".into()
                },
                Diagnostic {
                    level: Level::Info,
                    message: "second".into()
                },
            ]
        );
        assert_eq!(sink.messages(Level::Warn), vec!["first".to_string()]);
    }

    #[test]
    fn test_collecting_sink_accepts_concurrent_writes() {
        let sink = Arc::new(CollectingSink::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for j in 0..50 {
                        sink.warn(&format!("{i}:{j}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(sink.len(), 400);
    }

    #[test]
    fn test_null_sink_is_silent() {
        let sink = NullSink;
        sink.warn("ignored");
        sink.emit(Level::Error, "ignored");
    }
}
