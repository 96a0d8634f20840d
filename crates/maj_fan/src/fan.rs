//! The full-adder network container.

use crate::adder::FullAdder;
use crate::error::FanError;
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A named net fixed to a constant value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstDecl {
    /// The net name (e.g., `K0`, `T1`, `c2_0`).
    pub name: String,
    /// The fixed value.
    pub value: bool,
}

/// A full-adder network: ordered adders, a decision output, and declared constants.
///
/// Well-formed networks satisfy single static assignment and contain no forward
/// references: every net operand is a declared constant or the output of an
/// earlier adder. See [`Fan::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fan {
    /// Number of primary inputs `x[0..inputs]`.
    pub inputs: u32,
    /// Adders in evaluation order.
    pub ops: Vec<FullAdder>,
    /// The designated decision output.
    pub output: Signal,
    /// Named constants, declared before any use.
    pub constants: Vec<ConstDecl>,
}

impl Fan {
    /// Creates an empty network over `inputs` primary inputs whose output is constant 0.
    pub fn new(inputs: u32) -> Self {
        Self {
            inputs,
            ops: Vec::new(),
            output: Signal::ZERO,
            constants: Vec::new(),
        }
    }

    /// Returns the number of full adders.
    pub fn adder_count(&self) -> usize {
        self.ops.len()
    }

    /// Declares a named constant and returns a reference to it.
    ///
    /// Redeclaring an existing name with the same value is a no-op.
    pub fn declare_constant(&mut self, name: impl Into<String>, value: bool) -> Signal {
        let name = name.into();
        if !self.constants.iter().any(|c| c.name == name) {
            self.constants.push(ConstDecl {
                name: name.clone(),
                value,
            });
        }
        Signal::Net(name)
    }

    /// Returns the value of the declared constant `name`, if any.
    pub fn constant_value(&self, name: &str) -> Option<bool> {
        self.constants
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }

    /// Returns the statically known value of `signal`: a literal or a declared constant.
    pub fn static_value(&self, signal: &Signal) -> Option<bool> {
        match signal {
            Signal::Const(v) => Some(*v),
            Signal::Net(name) => self.constant_value(name),
            Signal::Input(_) => None,
        }
    }

    /// Checks the structural invariants of the network.
    ///
    /// Every operand must be a literal, an in-range primary input, a declared
    /// constant, or an output of an earlier adder; no net may be driven twice;
    /// the output must obey the same rules.
    pub fn validate(&self) -> Result<(), FanError> {
        let mut defined: HashSet<&str> = HashSet::new();
        for decl in &self.constants {
            if !defined.insert(decl.name.as_str()) {
                return Err(FanError::DuplicateDriver {
                    signal: decl.name.clone(),
                });
            }
        }

        for (index, op) in self.ops.iter().enumerate() {
            for operand in op.operands() {
                match operand {
                    Signal::Const(_) => {}
                    Signal::Input(i) => self.check_input(*i)?,
                    Signal::Net(name) => {
                        if !defined.contains(name.as_str()) {
                            return Err(FanError::UndrivenOperand {
                                op: index,
                                signal: name.clone(),
                            });
                        }
                    }
                }
            }
            for out in [&op.sum, &op.carry] {
                if !defined.insert(out.as_str()) {
                    return Err(FanError::DuplicateDriver {
                        signal: out.clone(),
                    });
                }
            }
        }

        match &self.output {
            Signal::Const(_) => Ok(()),
            Signal::Input(i) => self.check_input(*i),
            Signal::Net(name) if defined.contains(name.as_str()) => Ok(()),
            Signal::Net(name) => Err(FanError::UndrivenOutput {
                signal: name.clone(),
            }),
        }
    }

    fn check_input(&self, index: u32) -> Result<(), FanError> {
        if index < self.inputs {
            Ok(())
        } else {
            Err(FanError::InputOutOfRange {
                index,
                inputs: self.inputs,
            })
        }
    }

    /// Returns the maximum number of adders on any dependency path.
    ///
    /// Literals, primary inputs, and declared constants sit at level 0; an
    /// adder's level is one more than its deepest operand.
    pub fn depth(&self) -> u32 {
        let mut levels: HashMap<&str, u32> = HashMap::new();
        let mut max_level = 0;
        for op in &self.ops {
            let level = op
                .operands()
                .iter()
                .map(|s| match s {
                    Signal::Net(name) => levels.get(name.as_str()).copied().unwrap_or(0),
                    _ => 0,
                })
                .max()
                .unwrap_or(0)
                + 1;
            levels.insert(op.sum.as_str(), level);
            levels.insert(op.carry.as_str(), level);
            max_level = max_level.max(level);
        }
        max_level
    }

    /// Returns `true` if any adder operand or the output is the given literal.
    pub fn uses_literal(&self, value: bool) -> bool {
        self.output.literal() == Some(value)
            || self
                .ops
                .iter()
                .any(|op| op.operands().iter().any(|s| s.literal() == Some(value)))
    }
}
