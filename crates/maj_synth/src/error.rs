//! Error type for synthesis of a single design variant.

use maj_common::InternalError;
use maj_config::MAX_WIDTH;
use maj_diagnostics::code::{EMBEDDING, INTERNAL, INVALID_WIDTH, STRUCTURAL};
use maj_diagnostics::{Diagnostic, DiagnosticCode};
use maj_fan::FanError;

/// Errors that abort synthesis of a design variant.
///
/// Every error is detected synchronously while the variant is being built.
/// A failing variant never blocks independent variants.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// The requested width is even, below 3, or above [`MAX_WIDTH`].
    #[error("majority width must be an odd integer in 3..={MAX_WIDTH}, got {0}")]
    InvalidWidth(u32),

    /// A pass produced a network violating its structural invariants.
    #[error("structural invariant violated: {0}")]
    Structural(#[from] FanError),

    /// The scaffold would need a negative or unrepresentable number of constant pairs.
    #[error("scaffold embedding requires {pairs} constant pairs")]
    InfeasibleEmbedding {
        /// The pair count that was requested.
        pairs: i64,
    },

    /// The scaffold network's width does not match `n + 2 * pairs`.
    #[error("scaffold network has {actual} inputs, expected {expected}")]
    LayoutMismatch {
        /// Width implied by the target width and pair count.
        expected: u32,
        /// Width of the supplied network.
        actual: u32,
    },

    /// An internal pass invariant failed.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl SynthError {
    /// Returns the diagnostic code reported for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            SynthError::InvalidWidth(_) => INVALID_WIDTH,
            SynthError::Structural(_) => STRUCTURAL,
            SynthError::InfeasibleEmbedding { .. } | SynthError::LayoutMismatch { .. } => EMBEDDING,
            SynthError::Internal(_) => INTERNAL,
        }
    }

    /// Converts this error into an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self {
            SynthError::InvalidWidth(n) if n % 2 == 0 && (4..MAX_WIDTH).contains(n) => {
                diag.with_help(format!("use {} or {} inputs", n - 1, n + 1))
            }
            SynthError::InfeasibleEmbedding { .. } => {
                diag.with_help("the scaffold must be at least as wide as the target")
            }
            _ => diag,
        }
    }
}
