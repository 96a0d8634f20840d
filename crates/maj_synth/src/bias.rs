//! Bias-folded majority synthesis.
//!
//! With `threshold = (n + 1) / 2` and `w` the smallest width such that
//! `2^w > threshold - 1`, adding the constant `bias = 2^w - threshold` to the
//! population count makes `popcount >= threshold` equivalent to a carry out of
//! column `w - 1`. The bias bits are injected as named constants and the
//! decision is read straight off the carry-save fold, with no comparator.

use crate::error::SynthError;
use crate::scheduler::schedule;
use maj_fan::{Fan, NameGen, Signal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived parameters of a bias-folded design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasParams {
    /// Number of majority inputs.
    pub width: u32,
    /// Minimum number of ones for a true decision.
    pub threshold: u32,
    /// Number of columns folded before the decision carry (`w`).
    pub comparator_width: u32,
    /// Constant added to the population count.
    pub bias: u64,
}

impl BiasParams {
    /// Computes the parameters for an `n`-input majority.
    pub fn for_width(n: u32) -> Result<Self, SynthError> {
        crate::validate_width(n)?;
        let threshold = n / 2 + 1;
        let mut comparator_width = 0;
        while (1u64 << comparator_width) <= u64::from(threshold - 1) {
            comparator_width += 1;
        }
        let bias = (1u64 << comparator_width) - u64::from(threshold);
        Ok(Self {
            width: n,
            threshold,
            comparator_width,
            bias,
        })
    }

    /// Returns the columns holding a set bias bit, ascending.
    pub fn bias_columns(&self) -> Vec<u32> {
        (0..self.comparator_width)
            .filter(|j| (self.bias >> j) & 1 == 1)
            .collect()
    }
}

/// A raw bias-folded network together with its parameters.
#[derive(Debug, Clone)]
pub struct BiasFoldedNetwork {
    /// The derived parameters.
    pub params: BiasParams,
    /// The unoptimized network.
    pub fan: Fan,
}

/// Builds the raw bias-folded network for an `n`-input majority.
pub fn build_folded_bias(n: u32) -> Result<BiasFoldedNetwork, SynthError> {
    let params = BiasParams::for_width(n)?;
    let mut fan = Fan::new(n);

    let mut injected: BTreeMap<u32, Vec<Signal>> = BTreeMap::new();
    for j in params.bias_columns() {
        let k = fan.declare_constant(format!("K{j}"), true);
        injected.insert(j, vec![k]);
    }

    let inputs: Vec<Signal> = (0..n).map(Signal::Input).collect();
    let mut names = NameGen::new();
    let w = params.comparator_width;
    let ceiling = w.checked_sub(1);
    let sched = schedule(&inputs, &injected, ceiling, &mut names);

    fan.ops = sched.ops;
    fan.output = ceiling
        .and_then(|top| sched.last_carry.get(&top))
        .map(|carry| Signal::net(carry.as_str()))
        .unwrap_or(Signal::ZERO);
    Ok(BiasFoldedNetwork { params, fan })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact(fan: &Fan) {
        let n = fan.inputs;
        let threshold = (n + 1) / 2;
        for word in 0..(1u64 << n) {
            assert_eq!(
                fan.evaluate_word(word).unwrap(),
                word.count_ones() >= threshold,
                "n={n} word={word:b}"
            );
        }
    }

    #[test]
    fn params() {
        let p = BiasParams::for_width(3).unwrap();
        assert_eq!((p.threshold, p.comparator_width, p.bias), (2, 1, 0));
        let p = BiasParams::for_width(5).unwrap();
        assert_eq!((p.threshold, p.comparator_width, p.bias), (3, 2, 1));
        let p = BiasParams::for_width(9).unwrap();
        assert_eq!((p.threshold, p.comparator_width, p.bias), (5, 3, 3));
        assert_eq!(p.bias_columns(), vec![0, 1]);
        let p = BiasParams::for_width(15).unwrap();
        assert_eq!((p.threshold, p.comparator_width, p.bias), (8, 3, 0));
    }

    #[test]
    fn rejects_bad_widths() {
        for n in [0, 1, 2, 4, 10] {
            assert!(matches!(
                BiasParams::for_width(n),
                Err(SynthError::InvalidWidth(w)) if w == n
            ));
        }
    }

    #[test]
    fn rejects_widths_beyond_maximum() {
        for n in [u32::MAX, (1 << 31) + 1, maj_config::MAX_WIDTH + 2] {
            assert!(matches!(
                build_folded_bias(n),
                Err(SynthError::InvalidWidth(w)) if w == n
            ));
        }
        let p = BiasParams::for_width(maj_config::MAX_WIDTH).unwrap();
        assert_eq!((p.threshold, p.comparator_width, p.bias), (32_768, 15, 0));
    }

    #[test]
    fn three_inputs_is_one_adder() {
        let net = build_folded_bias(3).unwrap();
        assert_eq!(net.fan.adder_count(), 1);
        assert_eq!(net.fan.output, Signal::net("raw_c_c0_0"));
        assert!(net.fan.constants.is_empty());
        assert_exact(&net.fan);
    }

    #[test]
    fn five_inputs() {
        let net = build_folded_bias(5).unwrap();
        assert_eq!(net.fan.adder_count(), 4);
        assert_eq!(net.fan.depth(), 4);
        assert_eq!(net.fan.output, Signal::net("c_c1_3"));
        assert_eq!(net.fan.constant_value("K0"), Some(true));
        assert_eq!(net.fan.validate(), Ok(()));
        assert_exact(&net.fan);
    }

    #[test]
    fn exhaustive_equivalence() {
        for (n, adders) in [(7, 4), (9, 9), (11, 9), (13, 11), (15, 11)] {
            let net = build_folded_bias(n).unwrap();
            assert_eq!(net.fan.validate(), Ok(()));
            assert_eq!(net.fan.adder_count(), adders, "n={n}");
            assert_exact(&net.fan);
        }
    }

    #[test]
    fn nine_inputs_declares_two_bias_bits() {
        let net = build_folded_bias(9).unwrap();
        let names: Vec<&str> = net.fan.constants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["K0", "K1"]);
        assert_eq!(net.fan.output, Signal::net("c_c2_8"));
        assert_eq!(net.fan.depth(), 6);
    }
}
