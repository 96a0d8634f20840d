//! Full-adder operations.

use crate::signal::Signal;
use serde::{Deserialize, Serialize};

/// How an adder came to be instantiated.
///
/// Only used for labelling; every kind computes the same function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdderKind {
    /// Three raw column-0 inputs compressed before column folding.
    RawTriple,
    /// Accumulator plus two pending tokens of the same column.
    Triple,
    /// Accumulator plus the last pending token, carry-in tied to 0.
    Pair,
    /// One stage of a ripple-carry comparator.
    Ripple,
}

/// A single full-adder cell: `sum = a ^ b ^ cin`, `carry = maj(a, b, cin)`.
///
/// `sum` and `carry` are net names this operation drives; each is driven by
/// exactly one operation in a well-formed network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullAdder {
    /// First operand.
    pub a: Signal,
    /// Second operand.
    pub b: Signal,
    /// Carry-in operand.
    pub cin: Signal,
    /// Sum output net.
    pub sum: String,
    /// Carry output net.
    pub carry: String,
    /// Binary place value (column) the adder works at.
    pub column: u32,
    /// How the adder was instantiated.
    pub kind: AdderKind,
}

impl FullAdder {
    /// Returns the three operands in `a, b, cin` order.
    pub fn operands(&self) -> [&Signal; 3] {
        [&self.a, &self.b, &self.cin]
    }

    /// Returns mutable references to the three operands.
    pub fn operands_mut(&mut self) -> [&mut Signal; 3] {
        [&mut self.a, &mut self.b, &mut self.cin]
    }
}

/// Evaluates a full adder, returning `(sum, carry)`.
pub fn full_add(a: bool, b: bool, cin: bool) -> (bool, bool) {
    let ones = a as u8 + b as u8 + cin as u8;
    (ones & 1 == 1, ones >= 2)
}
