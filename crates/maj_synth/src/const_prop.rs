//! Constant folding pass.
//!
//! Walks adders in order. An operand is statically known when it is a
//! literal or a declared constant; an adder whose three operands are all
//! known is evaluated, its outputs are aliased to literals, and it is dropped.
//! Later operands and the network output are resolved through the aliases.

use crate::error::SynthError;
use crate::optimize::OptPass;
use maj_common::{InternalError, MajResult};
use maj_diagnostics::code::CONST_FOLDED;
use maj_diagnostics::{Diagnostic, DiagnosticSink};
use maj_fan::{full_add, Fan, Signal};
use std::collections::{HashMap, HashSet};

/// Constant folding pass.
pub(crate) struct ConstFoldPass;

/// Net renames produced while folding.
#[derive(Debug, Default)]
pub(crate) struct AliasMap {
    aliases: HashMap<String, Signal>,
}

impl AliasMap {
    /// Records that `name` now stands for `target`.
    pub(crate) fn insert(&mut self, name: impl Into<String>, target: Signal) {
        self.aliases.insert(name.into(), target);
    }

    /// Follows aliases from `signal` until reaching an unaliased signal.
    ///
    /// Returns an [`InternalError`] if the chain revisits a net.
    pub(crate) fn resolve(&self, signal: &Signal) -> MajResult<Signal> {
        let mut current = signal;
        let mut seen: HashSet<&str> = HashSet::new();
        while let Signal::Net(name) = current {
            let Some(target) = self.aliases.get(name) else {
                break;
            };
            if !seen.insert(name.as_str()) {
                return Err(InternalError::new(
                    "const-fold",
                    format!("alias cycle through {name}"),
                ));
            }
            current = target;
        }
        Ok(current.clone())
    }
}

impl OptPass for ConstFoldPass {
    fn name(&self) -> &'static str {
        "const-fold"
    }

    fn run(&self, fan: &Fan, sink: &DiagnosticSink) -> Result<Fan, SynthError> {
        let mut aliases = AliasMap::default();
        let mut out = Fan {
            inputs: fan.inputs,
            ops: Vec::with_capacity(fan.ops.len()),
            output: Signal::ZERO,
            constants: fan.constants.clone(),
        };

        for op in &fan.ops {
            let mut op = op.clone();
            for operand in op.operands_mut() {
                *operand = aliases.resolve(operand)?;
            }
            let known: Vec<bool> = op
                .operands()
                .iter()
                .filter_map(|s| fan.static_value(s))
                .collect();
            if let [a, b, cin] = known[..] {
                let (sum, carry) = full_add(a, b, cin);
                aliases.insert(op.sum, Signal::Const(sum));
                aliases.insert(op.carry, Signal::Const(carry));
            } else {
                out.ops.push(op);
            }
        }
        out.output = aliases.resolve(&fan.output)?;

        let removed = fan.ops.len() - out.ops.len();
        if removed > 0 {
            sink.emit(Diagnostic::note(
                CONST_FOLDED,
                format!("{}: folded {removed} constant adder(s)", self.name()),
            ));
        }
        Ok(out)
    }
}
