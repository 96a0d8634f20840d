//! Canonical two-level lowering of full-adder networks.
//!
//! Each full adder is mapped to 3-input gates described by the truth-table
//! rows on which they output 1. Complemented operands never appear as
//! separate inverter gates: they are folded into the rows. Operands are
//! sorted by `(name, complement)` so that equal networks always produce
//! byte-identical models.

use maj_common::{ContentHash, InternalError, MajResult};
use maj_config::GateBasis;
use maj_fan::signal::{CONST0_NAME, CONST1_NAME};
use maj_fan::{Fan, FullAdder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the single decision output.
pub const OUTPUT_NAME: &str = "maj";

/// The function computed by a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// 3-input majority, possibly over complemented operands.
    Majority,
    /// 3-input odd parity.
    Parity,
}

/// A 3-input gate in sum-of-minterms form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// The gate function before complement folding.
    pub kind: GateKind,
    /// Operand net names in canonical order.
    pub inputs: [String; 3],
    /// Driven net name.
    pub output: String,
    /// Minterms, as bit strings over `inputs`, on which the output is 1. Ascending.
    pub rows: Vec<String>,
}

impl Gate {
    /// Evaluates the gate for operand values in `inputs` order.
    pub fn eval(&self, bits: [bool; 3]) -> bool {
        let row: String = bits.iter().map(|b| if *b { '1' } else { '0' }).collect();
        self.rows.iter().any(|r| *r == row)
    }
}

/// A named constant net.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantNode {
    /// Net name.
    pub name: String,
    /// Driven value; a 1 has one unconditional row, a 0 has none.
    pub value: bool,
}

/// Buffer copying the decision net to the model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffer {
    /// Source net name.
    pub input: String,
    /// Model output name.
    pub output: String,
}

/// A combinational logic model ready for an external netlist writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicModel {
    /// Model name.
    pub name: String,
    /// Gate basis the adders were lowered into.
    pub basis: GateBasis,
    /// Primary input names `x0..`.
    pub inputs: Vec<String>,
    /// Output names; always `["maj"]`.
    pub outputs: Vec<String>,
    /// Constant nets, sorted by name.
    pub constants: Vec<ConstantNode>,
    /// Gates in dependency order.
    pub gates: Vec<Gate>,
    /// The output buffer.
    pub output_buffer: Buffer,
}

impl LogicModel {
    /// Returns a fingerprint of the serialized model.
    pub fn content_hash(&self) -> MajResult<ContentHash> {
        ContentHash::of_serialized(self)
            .map_err(|e| InternalError::new("emit", format!("serializing {}: {e}", self.name)))
    }

    /// Evaluates the model's output for one input vector.
    pub fn evaluate(&self, inputs: &[bool]) -> MajResult<bool> {
        if inputs.len() != self.inputs.len() {
            return Err(InternalError::new(
                "evaluate",
                format!(
                    "model {} has {} inputs, got {}",
                    self.name,
                    self.inputs.len(),
                    inputs.len()
                ),
            ));
        }
        let mut values: HashMap<&str, bool> = self
            .inputs
            .iter()
            .map(String::as_str)
            .zip(inputs.iter().copied())
            .collect();
        for c in &self.constants {
            values.insert(&c.name, c.value);
        }
        for gate in &self.gates {
            let mut bits = [false; 3];
            for (bit, name) in bits.iter_mut().zip(&gate.inputs) {
                *bit = *values.get(name.as_str()).ok_or_else(|| {
                    InternalError::new(
                        "evaluate",
                        format!("gate {} reads undriven net {name}", gate.output),
                    )
                })?;
            }
            values.insert(&gate.output, gate.eval(bits));
        }
        values
            .get(self.output_buffer.input.as_str())
            .copied()
            .ok_or_else(|| {
                InternalError::new(
                    "evaluate",
                    format!("output buffer reads undriven net {}", self.output_buffer.input),
                )
            })
    }
}

/// Builds a majority gate over `(name, complemented)` operands.
pub fn majority_gate(operands: [(String, bool); 3], output: impl Into<String>) -> Gate {
    let mut operands = operands;
    operands.sort();
    let masks = [operands[0].1, operands[1].1, operands[2].1];
    let rows = minterms(|bits| {
        bits.iter()
            .zip(masks)
            .filter(|(bit, mask)| **bit != *mask)
            .count()
            >= 2
    });
    Gate {
        kind: GateKind::Majority,
        inputs: operands.map(|(name, _)| name),
        output: output.into(),
        rows,
    }
}

/// Builds an odd-parity gate.
pub fn parity_gate(operands: [String; 3], output: impl Into<String>) -> Gate {
    let mut operands = operands;
    operands.sort();
    Gate {
        kind: GateKind::Parity,
        inputs: operands,
        output: output.into(),
        rows: minterms(|bits| bits.iter().filter(|b| **b).count() % 2 == 1),
    }
}

fn minterms(on: impl Fn([bool; 3]) -> bool) -> Vec<String> {
    (0..8u8)
        .map(|m| [m & 4 != 0, m & 2 != 0, m & 1 != 0])
        .filter(|bits| on(*bits))
        .map(|bits| bits.iter().map(|b| if *b { '1' } else { '0' }).collect())
        .collect()
}

/// Lowers `fan` into a canonical two-level model named `name`.
pub fn emit_logic(name: &str, fan: &Fan, basis: GateBasis) -> LogicModel {
    let mut constants: Vec<ConstantNode> = fan
        .constants
        .iter()
        .map(|c| ConstantNode {
            name: c.name.clone(),
            value: c.value,
        })
        .collect();
    for (value, literal) in [(false, CONST0_NAME), (true, CONST1_NAME)] {
        if fan.uses_literal(value) {
            constants.push(ConstantNode {
                name: literal.to_string(),
                value,
            });
        }
    }
    constants.sort_by(|a, b| a.name.cmp(&b.name));

    let mut gates = Vec::with_capacity(fan.ops.len() * 3);
    for (index, op) in fan.ops.iter().enumerate() {
        match basis {
            GateBasis::MajorityOnly => lower_majority_only(index, op, &mut gates),
            GateBasis::Mixed => lower_mixed(op, &mut gates),
        }
    }

    LogicModel {
        name: name.to_string(),
        basis,
        inputs: (0..fan.inputs).map(|i| format!("x{i}")).collect(),
        outputs: vec![OUTPUT_NAME.to_string()],
        constants,
        gates,
        output_buffer: Buffer {
            input: fan.output.to_string(),
            output: OUTPUT_NAME.to_string(),
        },
    }
}

/// `carry = MAJ(a, b, cin)`, `op1 = MAJ(!a, b, cin)`, `sum = MAJ(op1, a, !carry)`.
fn lower_majority_only(index: usize, op: &FullAdder, gates: &mut Vec<Gate>) {
    let [a, b, cin] = op.operands().map(|s| s.to_string());
    let op1 = format!("fa{index}_op1");
    gates.push(majority_gate(
        [(a.clone(), false), (b.clone(), false), (cin.clone(), false)],
        op.carry.clone(),
    ));
    gates.push(majority_gate(
        [(a.clone(), true), (b, false), (cin, false)],
        op1.clone(),
    ));
    gates.push(majority_gate(
        [(op1, false), (a, false), (op.carry.clone(), true)],
        op.sum.clone(),
    ));
}

fn lower_mixed(op: &FullAdder, gates: &mut Vec<Gate>) {
    let [a, b, cin] = op.operands().map(|s| s.to_string());
    gates.push(parity_gate([a.clone(), b.clone(), cin.clone()], op.sum.clone()));
    gates.push(majority_gate(
        [(a, false), (b, false), (cin, false)],
        op.carry.clone(),
    ));
}
