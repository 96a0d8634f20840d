//! Structural errors detected in full-adder networks.

/// A violation of the network's structural invariants.
///
/// Any of these indicates a defect in the pass that built the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FanError {
    /// An operand is neither a literal, a primary input, a declared constant,
    /// nor the output of an earlier adder.
    #[error("operand `{signal}` of adder #{op} has no driver")]
    UndrivenOperand {
        /// Index of the offending adder.
        op: usize,
        /// Name of the undriven operand.
        signal: String,
    },

    /// The decision output does not resolve to any driven signal.
    #[error("output `{signal}` has no driver")]
    UndrivenOutput {
        /// Name of the output signal.
        signal: String,
    },

    /// A net is driven more than once (or redeclared as a constant).
    #[error("net `{signal}` has more than one driver")]
    DuplicateDriver {
        /// Name of the multiply-driven net.
        signal: String,
    },

    /// A primary input index is outside the network's input range.
    #[error("input x{index} is out of range for a {inputs}-input network")]
    InputOutOfRange {
        /// The referenced input index.
        index: u32,
        /// Number of primary inputs of the network.
        inputs: u32,
    },

    /// A simulation was given the wrong number of input values.
    #[error("expected {expected} input values, got {got}")]
    InputCount {
        /// Number of primary inputs of the network.
        expected: u32,
        /// Number of values supplied.
        got: usize,
    },
}
