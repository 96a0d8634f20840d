//! Structured diagnostics for the majority synthesis flow.
//!
//! Passes report through a shared [`DiagnosticSink`]: errors for variants
//! that could not be built, warnings for unusual but correct results, and
//! notes for optimizer and layout-search outcomes. Every emitted code is a
//! constant in [`code`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
