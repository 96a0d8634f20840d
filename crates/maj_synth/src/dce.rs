//! Dead code elimination (DCE) pass.
//!
//! Walks adders backwards from the network output. An adder is kept when
//! either of its outputs is needed, and its net operands then become needed.
//! Declared constants that are no longer referenced are dropped and the rest
//! are sorted by name.

use crate::error::SynthError;
use crate::optimize::OptPass;
use maj_diagnostics::code::DEAD_ADDERS;
use maj_diagnostics::{Diagnostic, DiagnosticSink};
use maj_fan::{ConstDecl, Fan};
use std::collections::HashSet;

/// Dead code elimination pass.
pub(crate) struct DcePass;

impl OptPass for DcePass {
    fn name(&self) -> &'static str {
        "dce"
    }

    fn run(&self, fan: &Fan, sink: &DiagnosticSink) -> Result<Fan, SynthError> {
        let mut needed: HashSet<&str> = HashSet::new();
        if let Some(name) = fan.output.as_net() {
            needed.insert(name);
        }

        let mut live = vec![false; fan.ops.len()];
        for (index, op) in fan.ops.iter().enumerate().rev() {
            if !needed.contains(op.sum.as_str()) && !needed.contains(op.carry.as_str()) {
                continue;
            }
            live[index] = true;
            for operand in op.operands() {
                if let Some(name) = operand.as_net() {
                    needed.insert(name);
                }
            }
        }

        let ops: Vec<_> = fan
            .ops
            .iter()
            .zip(&live)
            .filter(|(_, keep)| **keep)
            .map(|(op, _)| op.clone())
            .collect();
        let mut constants: Vec<ConstDecl> = fan
            .constants
            .iter()
            .filter(|c| needed.contains(c.name.as_str()))
            .cloned()
            .collect();
        constants.sort_by(|a, b| a.name.cmp(&b.name));

        let removed = fan.ops.len() - ops.len();
        if removed > 0 {
            sink.emit(Diagnostic::note(
                DEAD_ADDERS,
                format!("{}: removed {removed} unused adder(s)", self.name()),
            ));
        }
        Ok(Fan {
            inputs: fan.inputs,
            ops,
            output: fan.output.clone(),
            constants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maj_fan::{AdderKind, FullAdder, Signal};

    fn adder(a: Signal, b: Signal, cin: Signal, id: u32) -> FullAdder {
        FullAdder {
            a,
            b,
            cin,
            sum: format!("s_c0_{id}"),
            carry: format!("c_c0_{id}"),
            column: 0,
            kind: AdderKind::Triple,
        }
    }

    fn network() -> Fan {
        let mut fan = Fan::new(3);
        let t = fan.declare_constant("T0", true);
        fan.declare_constant("K0", true);
        fan.ops.push(adder(Signal::Input(0), Signal::Input(1), Signal::Input(2), 0));
        fan.ops.push(adder(Signal::Input(0), Signal::Input(1), Signal::ZERO, 1));
        fan.ops.push(adder(Signal::net("s_c0_0"), t, Signal::ONE, 2));
        fan.output = Signal::net("c_c0_2");
        fan
    }

    #[test]
    fn removes_unreachable_adders() {
        let sink = DiagnosticSink::new();
        let out = DcePass.run(&network(), &sink).unwrap();
        let sums: Vec<&str> = out.ops.iter().map(|op| op.sum.as_str()).collect();
        assert_eq!(sums, vec!["s_c0_0", "s_c0_2"]);
        assert_eq!(out.validate(), Ok(()));
        assert_eq!(sink.codes()[0].to_string(), "O302");
    }

    #[test]
    fn drops_unused_constants() {
        let out = DcePass.run(&network(), &DiagnosticSink::new()).unwrap();
        let names: Vec<&str> = out.constants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["T0"]);
    }

    #[test]
    fn constants_sorted_by_name() {
        let mut fan = Fan::new(1);
        let t = fan.declare_constant("T0", true);
        let c = fan.declare_constant("c2_0", true);
        let k = fan.declare_constant("K1", true);
        fan.ops.push(adder(t, c, k, 0));
        fan.output = Signal::net("s_c0_0");
        let out = DcePass.run(&fan, &DiagnosticSink::new()).unwrap();
        let names: Vec<&str> = out.constants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["K1", "T0", "c2_0"]);
    }

    #[test]
    fn literal_output_keeps_nothing() {
        let mut fan = network();
        fan.output = Signal::ONE;
        let out = DcePass.run(&fan, &DiagnosticSink::new()).unwrap();
        assert!(out.ops.is_empty());
        assert!(out.constants.is_empty());
    }

    #[test]
    fn idempotent() {
        let sink = DiagnosticSink::new();
        let once = DcePass.run(&network(), &sink).unwrap();
        let twice = DcePass.run(&once, &sink).unwrap();
        assert_eq!(once, twice);
    }
}
