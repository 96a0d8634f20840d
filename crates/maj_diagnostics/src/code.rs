//! Diagnostic codes reported by the synthesis flow.
//!
//! Every code the workspace emits is defined here as a constant, so a code
//! number means the same thing wherever it appears.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The family a code belongs to, shown as its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// A variant could not be built (`E`).
    Error,
    /// A variant was built under unusual conditions (`W`).
    Warning,
    /// An optimizer pass report (`O`).
    Optimization,
    /// A scaffold layout search report (`L`).
    Layout,
}

impl Category {
    /// Returns the prefix letter.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Optimization => 'O',
            Category::Layout => 'L',
        }
    }
}

/// A prefix letter plus a three-digit number, e.g. `E101`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The code family.
    pub category: Category,
    /// The number within the family.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

/// The majority width is even, below 3, or above the supported maximum.
pub const INVALID_WIDTH: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
/// A network broke single assignment or referenced an undriven net.
pub const STRUCTURAL: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
/// A scaffold embedding was infeasible or sized inconsistently.
pub const EMBEDDING: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
/// A pass broke one of its own invariants.
pub const INTERNAL: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);
/// The scaffold needs no fixing pairs, so only the identity layout exists.
pub const NO_FIXING_PAIRS: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);
/// Constant folding removed adders.
pub const CONST_FOLDED: DiagnosticCode = DiagnosticCode::new(Category::Optimization, 301);
/// Dead-code elimination removed adders.
pub const DEAD_ADDERS: DiagnosticCode = DiagnosticCode::new(Category::Optimization, 302);
/// The layout search picked a layout.
pub const LAYOUT_CHOSEN: DiagnosticCode = DiagnosticCode::new(Category::Layout, 401);

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
