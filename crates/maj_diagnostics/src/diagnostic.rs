//! Structured diagnostic messages with severity, codes, and notes.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message produced while synthesizing a design.
///
/// Each diagnostic includes:
/// - A severity level and unique code
/// - A primary message
/// - An optional subject naming the design or pass it concerns
/// - Optional notes and help text
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The design or pass the diagnostic concerns (e.g., `maj_fb_9`).
    pub subject: Option<String>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, code: DiagnosticCode, message: String) -> Self {
        Self {
            severity,
            code,
            message,
            subject: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic with the given code and message.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, code, message.into())
    }

    /// Creates a new warning diagnostic with the given code and message.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message.into())
    }

    /// Creates a new informational note with the given code and message.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, code, message.into())
    }

    /// Sets the subject (design or pass name) of this diagnostic.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{CONST_FOLDED, EMBEDDING, INVALID_WIDTH, LAYOUT_CHOSEN};

    #[test]
    fn create_error() {
        let code = INVALID_WIDTH;
        let diag = Diagnostic::error(code, "width must be odd");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "width must be odd");
        assert_eq!(format!("{}", diag.code), "E101");
        assert!(diag.subject.is_none());
    }

    #[test]
    fn create_note() {
        let code = CONST_FOLDED;
        let diag = Diagnostic::note(code, "folded 2 adders");
        assert_eq!(diag.severity, Severity::Note);
    }

    #[test]
    fn builder_methods() {
        let code = EMBEDDING;
        let diag = Diagnostic::error(code, "negative constant-pair count")
            .with_subject("maj_fb_majpath_9")
            .with_note("scaffold width 7 is smaller than the target width")
            .with_help("embed into a wider network");
        assert_eq!(diag.subject.as_deref(), Some("maj_fb_majpath_9"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let code = LAYOUT_CHOSEN;
        let diag = Diagnostic::note(code, "chose clustered").with_subject("search");
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.message, "chose clustered");
        assert_eq!(back.code, code);
    }
}
