//! Single-bit signal references.
//!
//! A [`Signal`] is either a literal constant, a primary input, or a named net
//! (an adder output or a declared constant).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical name of the literal constant 0.
pub const CONST0_NAME: &str = "CONST0";

/// Canonical name of the literal constant 1.
pub const CONST1_NAME: &str = "CONST1";

/// A reference to a single-bit value in a full-adder network.
///
/// The derived ordering is only used for deterministic collections; canonical
/// emission sorts by the [`Display`](fmt::Display) name instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Signal {
    /// A literal constant bit.
    Const(bool),
    /// Primary input `x[i]`.
    Input(u32),
    /// A named net: an adder output or a declared constant.
    Net(String),
}

impl Signal {
    /// The literal constant 0.
    pub const ZERO: Signal = Signal::Const(false);
    /// The literal constant 1.
    pub const ONE: Signal = Signal::Const(true);

    /// Creates a reference to the named net.
    pub fn net(name: impl Into<String>) -> Self {
        Signal::Net(name.into())
    }

    /// Returns the value of a literal constant, or `None` for inputs and nets.
    pub fn literal(&self) -> Option<bool> {
        match self {
            Signal::Const(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the net name if this is a [`Signal::Net`].
    pub fn as_net(&self) -> Option<&str> {
        match self {
            Signal::Net(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Const(false) => f.write_str(CONST0_NAME),
            Signal::Const(true) => f.write_str(CONST1_NAME),
            Signal::Input(i) => write!(f, "x{i}"),
            Signal::Net(name) => f.write_str(name),
        }
    }
}
