//! Bit-level simulation of full-adder networks.

use crate::adder::full_add;
use crate::error::FanError;
use crate::fan::Fan;
use crate::signal::Signal;
use std::collections::HashMap;

/// Values of every signal after simulating a network on one input vector.
#[derive(Debug, Clone)]
pub struct SignalValues {
    inputs: Vec<bool>,
    nets: HashMap<String, bool>,
}

impl SignalValues {
    /// Returns the value of `signal`, or `None` if it was never driven.
    pub fn get(&self, signal: &Signal) -> Option<bool> {
        match signal {
            Signal::Const(v) => Some(*v),
            Signal::Input(i) => self.inputs.get(*i as usize).copied(),
            Signal::Net(name) => self.nets.get(name).copied(),
        }
    }
}

impl Fan {
    /// Simulates the network on `inputs` and returns every signal value.
    pub fn simulate(&self, inputs: &[bool]) -> Result<SignalValues, FanError> {
        if inputs.len() != self.inputs as usize {
            return Err(FanError::InputCount {
                expected: self.inputs,
                got: inputs.len(),
            });
        }
        let mut values = SignalValues {
            inputs: inputs.to_vec(),
            nets: self
                .constants
                .iter()
                .map(|c| (c.name.clone(), c.value))
                .collect(),
        };
        for (index, op) in self.ops.iter().enumerate() {
            let mut bits = [false; 3];
            for (bit, operand) in bits.iter_mut().zip(op.operands()) {
                *bit = values.get(operand).ok_or_else(|| FanError::UndrivenOperand {
                    op: index,
                    signal: operand.to_string(),
                })?;
            }
            let (sum, carry) = full_add(bits[0], bits[1], bits[2]);
            values.nets.insert(op.sum.clone(), sum);
            values.nets.insert(op.carry.clone(), carry);
        }
        Ok(values)
    }

    /// Simulates the network and returns the decision output.
    pub fn evaluate(&self, inputs: &[bool]) -> Result<bool, FanError> {
        let values = self.simulate(inputs)?;
        values
            .get(&self.output)
            .ok_or_else(|| FanError::UndrivenOutput {
                signal: self.output.to_string(),
            })
    }

    /// Evaluates the network with input `i` taken from bit `i` of `word`.
    ///
    /// Only networks with at most 64 inputs can be driven this way.
    pub fn evaluate_word(&self, word: u64) -> Result<bool, FanError> {
        if self.inputs > 64 {
            return Err(FanError::InputCount {
                expected: self.inputs,
                got: 64,
            });
        }
        let bits: Vec<bool> = (0..self.inputs).map(|i| (word >> i) & 1 == 1).collect();
        self.evaluate(&bits)
    }
}
