//! Non-fatal notices raised while extracting a hash
//!
//! Extraction never writes to a global logger directly. Callers pass a
//! [`DiagnosticSink`]; [`TracingSink`] forwards to `tracing`, while
//! [`CollectingSink`] keeps the notices for inspection.

use std::cell::RefCell;
use std::fmt;

/// A condition worth reporting that does not stop extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `/R` is not a known standard security handler revision
    UnknownRevision { revision: i64, fallback: usize },
    /// `/Filter` names a handler other than `/Standard`
    NonStandardFilter { filter: String },
    /// An optional field is present with the wrong type and its default is used
    IgnoredField {
        field: &'static str,
        value: String,
        default: i64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownRevision { revision, fallback } => write!(
                f,
                "unknown security handler revision {revision}, assuming {fallback} byte entries"
            ),
            Diagnostic::NonStandardFilter { filter } => {
                write!(f, "security handler /{filter} is not /Standard")
            }
            Diagnostic::IgnoredField {
                field,
                value,
                default,
            } => write!(f, "ignoring /{field} {value}, using default {default}"),
        }
    }
}

/// Receiver for [`Diagnostic`]s
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(Diagnostic),
{
    fn emit(&self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Forwards every diagnostic as a `tracing` warning
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
    }
}

/// Records diagnostics in emission order
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
