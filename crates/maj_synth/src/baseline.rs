//! Threshold-comparator baseline synthesis.
//!
//! The `n` inputs are padded with constant 1/0 pairs up to `N = 2^p - 1`
//! inputs, whose majority threshold is `2^(p-1)`. The padded population count
//! is reduced by the carry-save scheduler to one bit per column, and a ripple
//! comparator adds `threshold_N - 1` plus a carry-in of 1; its final carry is
//! the decision.

use crate::error::SynthError;
use crate::scheduler::schedule;
use maj_fan::{AdderKind, Fan, FullAdder, NameGen, Signal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived parameters of a baseline design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineParams {
    /// Number of majority inputs.
    pub width: u32,
    /// Minimum number of ones for a true decision.
    pub threshold: u32,
    /// Bits of the padded population count (`p`), also the comparator length.
    pub scaffold_bits: u32,
    /// Padded input count `2^p - 1`.
    pub scaffold_inputs: u32,
    /// Majority threshold of the padded width.
    pub scaffold_threshold: u32,
    /// Number of constant 1/0 pairs added.
    pub pairs: u32,
}

impl BaselineParams {
    /// Computes the parameters for an `n`-input majority.
    pub fn for_width(n: u32) -> Result<Self, SynthError> {
        crate::validate_width(n)?;
        let mut scaffold_bits = 0;
        while (1u64 << scaffold_bits) < u64::from(n) + 1 {
            scaffold_bits += 1;
        }
        let scaffold_inputs = (1u32 << scaffold_bits) - 1;
        let pairs = i64::from((scaffold_inputs - 1) / 2) - i64::from((n - 1) / 2);
        let pairs = u32::try_from(pairs).map_err(|_| SynthError::InfeasibleEmbedding { pairs })?;
        Ok(Self {
            width: n,
            threshold: n / 2 + 1,
            scaffold_bits,
            scaffold_inputs,
            scaffold_threshold: scaffold_inputs / 2 + 1,
            pairs,
        })
    }
}

/// A raw baseline network together with its parameters.
#[derive(Debug, Clone)]
pub struct BaselineNetwork {
    /// The derived parameters.
    pub params: BaselineParams,
    /// The unoptimized network.
    pub fan: Fan,
    /// Number of ripple-comparator adders at the end of `fan.ops`.
    pub comparator_adders: usize,
}

/// Builds the raw baseline network for an `n`-input majority.
pub fn build_baseline(n: u32) -> Result<BaselineNetwork, SynthError> {
    let params = BaselineParams::for_width(n)?;
    let mut fan = Fan::new(n);

    let mut inputs: Vec<Signal> = (0..n).map(Signal::Input).collect();
    inputs.extend((0..params.pairs).map(|_| Signal::ONE));
    inputs.extend((0..params.pairs).map(|_| Signal::ZERO));

    let mut names = NameGen::new();
    let sched = schedule(&inputs, &BTreeMap::new(), None, &mut names);
    fan.ops = sched.ops;

    let m = params.scaffold_bits;
    let addend = u64::from(params.scaffold_threshold - 1);
    let mut carry = fan.declare_constant("c2_0", true);
    for i in 0..m {
        let hw = sched.residuals.get(&i).cloned().unwrap_or(Signal::ZERO);
        let t = if (addend >> i) & 1 == 1 {
            fan.declare_constant(format!("T{i}"), true)
        } else {
            Signal::ZERO
        };
        let next = format!("c2_{}", i + 1);
        fan.ops.push(FullAdder {
            a: hw,
            b: t,
            cin: carry,
            sum: format!("s2_{i}"),
            carry: next.clone(),
            column: i,
            kind: AdderKind::Ripple,
        });
        carry = Signal::Net(next);
    }
    fan.output = carry;

    Ok(BaselineNetwork {
        params,
        fan,
        comparator_adders: m as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact(fan: &Fan) {
        let n = fan.inputs;
        for word in 0..(1u64 << n) {
            assert_eq!(
                fan.evaluate_word(word).unwrap(),
                word.count_ones() > n / 2,
                "n={n} word={word:b}"
            );
        }
    }

    #[test]
    fn params() {
        let p = BaselineParams::for_width(3).unwrap();
        assert_eq!((p.scaffold_bits, p.scaffold_inputs, p.pairs), (2, 3, 0));
        let p = BaselineParams::for_width(11).unwrap();
        assert_eq!(
            (p.scaffold_bits, p.scaffold_inputs, p.scaffold_threshold, p.pairs),
            (4, 15, 8, 2)
        );
        let p = BaselineParams::for_width(15).unwrap();
        assert_eq!((p.scaffold_bits, p.pairs), (4, 0));
    }

    #[test]
    fn rejects_even_width() {
        assert!(matches!(
            build_baseline(6),
            Err(SynthError::InvalidWidth(6))
        ));
    }

    #[test]
    fn rejects_widths_beyond_maximum() {
        for n in [u32::MAX, (1 << 31) + 1, maj_config::MAX_WIDTH + 2] {
            assert!(matches!(
                BaselineParams::for_width(n),
                Err(SynthError::InvalidWidth(w)) if w == n
            ));
        }
        let p = BaselineParams::for_width(maj_config::MAX_WIDTH).unwrap();
        assert_eq!((p.scaffold_bits, p.scaffold_inputs, p.pairs), (16, 65_535, 0));
        assert_eq!(p.scaffold_threshold, 32_768);
    }

    #[test]
    fn three_inputs() {
        let net = build_baseline(3).unwrap();
        assert_eq!(net.fan.adder_count(), 3);
        assert_eq!(net.comparator_adders, 2);
        assert_eq!(net.fan.depth(), 3);
        assert_eq!(net.fan.output, Signal::net("c2_2"));
        assert_eq!(net.fan.constant_value("c2_0"), Some(true));
        assert_eq!(net.fan.constant_value("T0"), Some(true));
        assert_eq!(net.fan.constant_value("T1"), None);
        assert_exact(&net.fan);
    }

    #[test]
    fn exhaustive_equivalence() {
        for (n, adders, depth) in [(5, 7, 5), (7, 7, 5), (9, 15, 7), (11, 15, 7), (15, 15, 7)] {
            let net = build_baseline(n).unwrap();
            assert_eq!(net.fan.validate(), Ok(()));
            assert_eq!(net.fan.adder_count(), adders, "n={n}");
            assert_eq!(net.fan.depth(), depth, "n={n}");
            assert_exact(&net.fan);
        }
    }

    #[test]
    fn comparator_tail() {
        let net = build_baseline(9).unwrap();
        let tail = &net.fan.ops[net.fan.ops.len() - net.comparator_adders..];
        assert!(tail.iter().all(|op| op.kind == AdderKind::Ripple));
        assert_eq!(tail[0].cin, Signal::net("c2_0"));
        assert_eq!(tail[3].carry, "c2_4");
    }
}
