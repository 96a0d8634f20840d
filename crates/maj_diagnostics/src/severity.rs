//! How serious a reported diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity, ordered so that `Error` is the greatest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// A pass report, such as how many adders were folded away.
    Note,
    /// Something unusual that still yields a correct design.
    Warning,
    /// The affected variant was not built.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}
