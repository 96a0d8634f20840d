//! Collects the diagnostics of a synthesis run.

use crate::code::DiagnosticCode;
use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::{Mutex, MutexGuard};

/// Accumulates diagnostics in emission order.
///
/// Passes take `&DiagnosticSink`, so the sink can be shared across threads.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panicking emitter cannot leave the vector half-written.
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.entries().push(diag);
    }

    /// Returns how many recorded diagnostics have `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns `true` if an error was recorded.
    pub fn has_errors(&self) -> bool {
        self.entries().iter().any(|d| d.severity.is_error())
    }

    /// Returns the number of recorded errors.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns the recorded codes in emission order.
    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.entries().iter().map(|d| d.code).collect()
    }

    /// Returns a copy of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries().clone()
    }
}
