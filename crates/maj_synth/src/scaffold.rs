//! Scaffold embedding search.
//!
//! An `n`-input majority equals a larger majority with some inputs tied to
//! equal numbers of 1s and 0s. A network built for the larger width is
//! specialized by substituting each of its inputs with a real input or a
//! constant according to a [`Layout`]; constant folding then removes the
//! adders the constants make redundant. Different layouts fold differently,
//! so a fixed set of heuristic layouts plus seeded shuffles is scored and the
//! cheapest kept.

use crate::error::SynthError;
use crate::optimize::optimize;
use maj_common::{InternalError, MajResult};
use maj_config::ScaffoldTarget;
use maj_diagnostics::code::{LAYOUT_CHOSEN, NO_FIXING_PAIRS};
use maj_diagnostics::{Diagnostic, DiagnosticSink};
use maj_fan::{Fan, Signal};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// What drives one input of the scaffold network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutSlot {
    /// Real input `x[i]` of the target width.
    Real(u32),
    /// Constant 1 from a fixing pair.
    One,
    /// Constant 0 from a fixing pair.
    Zero,
}

impl LayoutSlot {
    /// Returns the signal substituted for this slot.
    pub fn source(self) -> Signal {
        match self {
            LayoutSlot::Real(i) => Signal::Input(i),
            LayoutSlot::One => Signal::ONE,
            LayoutSlot::Zero => Signal::ZERO,
        }
    }
}

/// An ordered assignment of scaffold inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Heuristic name (`clustered`, `rand3`, ...).
    pub label: String,
    /// Slot `i` drives scaffold input `i`.
    pub slots: Vec<LayoutSlot>,
}

impl Layout {
    /// Checks that every real input appears exactly once alongside `pairs`
    /// ones and `pairs` zeros.
    pub fn check(&self, n: u32, pairs: u32) -> MajResult<()> {
        let mut seen = vec![false; n as usize];
        let (mut ones, mut zeros) = (0, 0);
        for slot in &self.slots {
            match *slot {
                LayoutSlot::Real(i) => {
                    let Some(flag) = seen.get_mut(i as usize) else {
                        return Err(InternalError::new(
                            "layout-check",
                            format!("layout {} references x{i} beyond width {n}", self.label),
                        ));
                    };
                    if std::mem::replace(flag, true) {
                        return Err(InternalError::new(
                            "layout-check",
                            format!("layout {} repeats x{i}", self.label),
                        ));
                    }
                }
                LayoutSlot::One => ones += 1,
                LayoutSlot::Zero => zeros += 1,
            }
        }
        if seen.iter().any(|s| !s) || ones != pairs || zeros != pairs {
            return Err(InternalError::new(
                "layout-check",
                format!(
                    "layout {} is not a permutation of {n} inputs and {pairs} pairs",
                    self.label
                ),
            ));
        }
        Ok(())
    }
}

/// Sizing of the scaffold a width is embedded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldPlan {
    /// Target majority width.
    pub width: u32,
    /// Scaffold network width, `width + 2 * pairs`.
    pub scaffold_width: u32,
    /// Number of 1/0 fixing pairs.
    pub pairs: u32,
}

impl ScaffoldPlan {
    /// Sizes the scaffold for an `n`-input majority.
    ///
    /// Both `n` and the resulting scaffold width must be valid widths.
    pub fn new(n: u32, target: ScaffoldTarget) -> Result<Self, SynthError> {
        crate::validate_width(n)?;
        let scaffold_width = match target {
            ScaffoldTarget::Minimal => n + 2,
            ScaffoldTarget::PowerOfTwo => {
                let mut bits = 0;
                while (1u64 << bits) < u64::from(n) + 1 {
                    bits += 1;
                }
                (1u32 << bits) - 1
            }
        };
        crate::validate_width(scaffold_width)?;
        Ok(Self {
            width: n,
            scaffold_width,
            pairs: (scaffold_width - n) / 2,
        })
    }
}

/// Score of one evaluated layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutScore {
    /// Layout label.
    pub label: String,
    /// Adders left after optimization.
    pub adders: usize,
}

/// The outcome of a layout search.
#[derive(Debug, Clone)]
pub struct LayoutChoice {
    /// The winning layout.
    pub layout: Layout,
    /// The optimized network under the winning layout.
    pub fan: Fan,
    /// Adder count of `fan`.
    pub score: usize,
    /// Every candidate's score, in generation order.
    pub scores: Vec<LayoutScore>,
}

/// Generates the candidate layouts in their fixed order.
///
/// With no pairs only `identity` is produced. Otherwise the heuristic
/// layouts come first, followed by `random_trials` seeded shuffles.
pub fn candidate_layouts(n: u32, pairs: u32, random_trials: u32) -> Vec<Layout> {
    let reals = || (0..n).map(LayoutSlot::Real);
    if pairs == 0 {
        return vec![Layout {
            label: "identity".into(),
            slots: reals().collect(),
        }];
    }

    let total = n as usize + 2 * pairs as usize;
    let base: Vec<LayoutSlot> = reals()
        .chain((0..pairs).map(|_| LayoutSlot::One))
        .chain((0..pairs).map(|_| LayoutSlot::Zero))
        .collect();

    let mut layouts = vec![
        Layout {
            label: "clustered".into(),
            slots: base.clone(),
        },
        Layout {
            label: "interleaved".into(),
            slots: interleaved(n, pairs),
        },
        Layout {
            label: "alternating".into(),
            slots: alternating(n, pairs, total),
        },
        Layout {
            label: "alt_off1".into(),
            slots: alt_offset(n, pairs, total),
        },
    ];

    for seed in 0..random_trials {
        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        let mut slots = base.clone();
        slots.shuffle(&mut rng);
        layouts.push(Layout {
            label: format!("rand{seed}"),
            slots,
        });
    }
    layouts
}

/// Tracks how many of each slot kind remain to be placed.
struct SlotPool {
    next_real: u32,
    n: u32,
    ones: u32,
    zeros: u32,
}

impl SlotPool {
    fn new(n: u32, pairs: u32) -> Self {
        Self {
            next_real: 0,
            n,
            ones: pairs,
            zeros: pairs,
        }
    }

    fn real(&mut self) -> Option<LayoutSlot> {
        (self.next_real < self.n).then(|| {
            self.next_real += 1;
            LayoutSlot::Real(self.next_real - 1)
        })
    }

    fn one(&mut self) -> Option<LayoutSlot> {
        (self.ones > 0).then(|| {
            self.ones -= 1;
            LayoutSlot::One
        })
    }

    fn zero(&mut self) -> Option<LayoutSlot> {
        (self.zeros > 0).then(|| {
            self.zeros -= 1;
            LayoutSlot::Zero
        })
    }
}

/// Each real input followed by a 1 and a 0 while pairs last.
fn interleaved(n: u32, pairs: u32) -> Vec<LayoutSlot> {
    let mut pool = SlotPool::new(n, pairs);
    let mut slots = Vec::new();
    while let Some(real) = pool.real() {
        slots.push(real);
        slots.extend(pool.one());
        slots.extend(pool.zero());
    }
    while pool.ones > 0 || pool.zeros > 0 {
        slots.extend(pool.one());
        slots.extend(pool.zero());
    }
    slots
}

/// Repeating `x, 1, x, 0` until pairs run out, then the remainder in order.
fn alternating(n: u32, pairs: u32, total: usize) -> Vec<LayoutSlot> {
    let mut pool = SlotPool::new(n, pairs);
    let mut slots = Vec::with_capacity(total);
    while slots.len() < total {
        slots.extend(pool.real());
        slots.extend(pool.one());
        slots.extend(pool.real());
        slots.extend(pool.zero());
    }
    slots.truncate(total);
    slots
}

/// Reals on even steps, a 1 or a 0 on alternating odd steps, falling back to
/// whatever is left.
fn alt_offset(n: u32, pairs: u32, total: usize) -> Vec<LayoutSlot> {
    let mut pool = SlotPool::new(n, pairs);
    let mut slots = Vec::with_capacity(total);
    let mut step = 0u32;
    while slots.len() < total {
        let preferred = match step % 4 {
            0 | 2 => pool.real(),
            1 => pool.one(),
            _ => pool.zero(),
        };
        let slot = preferred
            .or_else(|| pool.real())
            .or_else(|| pool.one())
            .or_else(|| pool.zero());
        match slot {
            Some(slot) => slots.push(slot),
            None => break,
        }
        step += 1;
    }
    slots
}

/// Substitutes the scaffold network's inputs according to `layout`.
///
/// The result has `n` inputs; constants are left for the optimizer to fold.
pub fn apply_layout(big: &Fan, layout: &Layout, n: u32) -> Result<Fan, SynthError> {
    if layout.slots.len() != big.inputs as usize {
        return Err(SynthError::LayoutMismatch {
            expected: layout.slots.len() as u32,
            actual: big.inputs,
        });
    }
    let remap = |signal: &mut Signal| {
        if let Signal::Input(i) = *signal {
            if let Some(slot) = layout.slots.get(i as usize) {
                *signal = slot.source();
            }
        }
    };

    let mut fan = big.clone();
    fan.inputs = n;
    for op in &mut fan.ops {
        for operand in op.operands_mut() {
            remap(operand);
        }
    }
    remap(&mut fan.output);
    Ok(fan)
}

/// Searches the candidate layouts for the one leaving the fewest adders.
///
/// `n` must be a valid width and `big` must have `n + 2 * pairs` inputs.
/// Ties keep the earliest candidate.
/// The per-candidate optimizer notes are discarded; the choice is reported
/// as an `L401` note on `sink`.
pub fn search_layouts(
    n: u32,
    big: &Fan,
    pairs: i64,
    random_trials: u32,
    sink: &DiagnosticSink,
) -> Result<LayoutChoice, SynthError> {
    crate::validate_width(n)?;
    let Some((pairs, expected)) = u32::try_from(pairs).ok().and_then(|pairs| {
        let expected = pairs.checked_mul(2)?.checked_add(n)?;
        Some((pairs, expected))
    }) else {
        return Err(SynthError::InfeasibleEmbedding { pairs });
    };
    if big.inputs != expected {
        return Err(SynthError::LayoutMismatch {
            expected,
            actual: big.inputs,
        });
    }
    if pairs == 0 {
        sink.emit(
            Diagnostic::warning(
                NO_FIXING_PAIRS,
                format!("scaffold for width {n} has no constant pairs"),
            )
            .with_note("only the identity layout is evaluated"),
        );
    }

    let scratch = DiagnosticSink::new();
    let mut scores = Vec::new();
    let mut best: Option<(Layout, Fan, usize)> = None;
    for layout in candidate_layouts(n, pairs, random_trials) {
        layout.check(n, pairs)?;
        let fan = optimize(&apply_layout(big, &layout, n)?, &scratch)?;
        let adders = fan.adder_count();
        scores.push(LayoutScore {
            label: layout.label.clone(),
            adders,
        });
        if best.as_ref().map_or(true, |(_, _, score)| adders < *score) {
            best = Some((layout, fan, adders));
        }
    }

    let (layout, fan, score) = best
        .ok_or_else(|| InternalError::new("layout-search", "no candidate layouts generated"))?;
    sink.emit(
        Diagnostic::note(
            LAYOUT_CHOSEN,
            format!(
                "layout {} chosen with {score} adders out of {} candidates",
                layout.label,
                scores.len()
            ),
        )
        .with_subject(format!("width {n} in scaffold {expected}")),
    );
    Ok(LayoutChoice {
        layout,
        fan,
        score,
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::build_baseline;
    use crate::bias::build_folded_bias;

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
    fn plans() {
        let p = ScaffoldPlan::new(11, ScaffoldTarget::Minimal).unwrap();
        assert_eq!((p.scaffold_width, p.pairs), (13, 1));
        let p = ScaffoldPlan::new(11, ScaffoldTarget::PowerOfTwo).unwrap();
        assert_eq!((p.scaffold_width, p.pairs), (15, 2));
        let p = ScaffoldPlan::new(7, ScaffoldTarget::PowerOfTwo).unwrap();
        assert_eq!((p.scaffold_width, p.pairs), (7, 0));
        assert!(ScaffoldPlan::new(4, ScaffoldTarget::Minimal).is_err());
    }

    #[test]
    fn plans_reject_widths_that_would_overflow() {
        for target in [ScaffoldTarget::Minimal, ScaffoldTarget::PowerOfTwo] {
            for n in [u32::MAX, (1 << 31) + 1, 65_537] {
                assert!(matches!(
                    ScaffoldPlan::new(n, target),
                    Err(SynthError::InvalidWidth(w)) if w == n
                ));
            }
        }
        let p = ScaffoldPlan::new(65_533, ScaffoldTarget::PowerOfTwo).unwrap();
        assert_eq!((p.scaffold_width, p.pairs), (65_535, 1));
        assert!(matches!(
            ScaffoldPlan::new(65_535, ScaffoldTarget::Minimal),
            Err(SynthError::InvalidWidth(65_537))
        ));
    }

    #[test]
    fn candidates_are_permutations() {
        for (n, pairs) in [(3, 1), (5, 1), (9, 3), (11, 2), (13, 1)] {
            let layouts = candidate_layouts(n, pairs, 12);
            assert_eq!(layouts.len(), 16);
            for layout in &layouts {
                assert_eq!(layout.slots.len(), (n + 2 * pairs) as usize);
                layout.check(n, pairs).unwrap();
            }
        }
    }

    #[test]
    fn heuristic_shapes() {
        use LayoutSlot::{One, Real, Zero};
        let layouts = candidate_layouts(3, 2, 0);
        let labels: Vec<&str> = layouts.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["clustered", "interleaved", "alternating", "alt_off1"]);
        assert_eq!(
            layouts[0].slots,
            vec![Real(0), Real(1), Real(2), One, One, Zero, Zero]
        );
        assert_eq!(
            layouts[1].slots,
            vec![Real(0), One, Zero, Real(1), One, Zero, Real(2)]
        );
        assert_eq!(
            layouts[2].slots,
            vec![Real(0), One, Real(1), Zero, Real(2), One, Zero]
        );
        assert_eq!(
            layouts[3].slots,
            vec![Real(0), One, Real(1), Zero, Real(2), One, Zero]
        );
    }

    #[test]
    fn identity_when_no_pairs() {
        let layouts = candidate_layouts(5, 0, 12);
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].label, "identity");
    }

    #[test]
    fn random_layouts_reproducible() {
        assert_eq!(candidate_layouts(9, 3, 12), candidate_layouts(9, 3, 12));
    }

    #[test]
    fn check_rejects_bad_layouts() {
        let layout = Layout {
            label: "bad".into(),
            slots: vec![LayoutSlot::Real(0), LayoutSlot::Real(0), LayoutSlot::One],
        };
        assert!(layout.check(2, 0).is_err());
        let layout = Layout {
            label: "short".into(),
            slots: vec![LayoutSlot::Real(0), LayoutSlot::One],
        };
        assert!(layout.check(1, 1).is_err());
    }

    #[test]
    fn negative_pairs_infeasible() {
        let big = build_folded_bias(5).unwrap().fan;
        let err = search_layouts(5, &big, -1, 0, &DiagnosticSink::new()).unwrap_err();
        assert!(matches!(err, SynthError::InfeasibleEmbedding { pairs: -1 }));
        assert_eq!(err.code().to_string(), "E103");
    }

    #[test]
    fn oversized_pair_counts_infeasible() {
        let big = build_folded_bias(5).unwrap().fan;
        let sink = DiagnosticSink::new();
        for pairs in [i64::MAX, 1 << 31, i64::from(u32::MAX)] {
            let err = search_layouts(5, &big, pairs, 0, &sink).unwrap_err();
            assert!(matches!(err, SynthError::InfeasibleEmbedding { pairs: p } if p == pairs));
        }
        let err = search_layouts(u32::MAX, &big, 1, 0, &sink).unwrap_err();
        assert!(matches!(err, SynthError::InvalidWidth(u32::MAX)));
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn width_mismatch_rejected() {
        let big = build_folded_bias(9).unwrap().fan;
        let err = search_layouts(5, &big, 1, 0, &DiagnosticSink::new()).unwrap_err();
        assert!(matches!(
            err,
            SynthError::LayoutMismatch {
                expected: 7,
                actual: 9
            }
        ));
    }

    #[test]
    fn every_candidate_is_exact() {
        for big in [
            build_folded_bias(15).unwrap().fan,
            build_baseline(15).unwrap().fan,
        ] {
            for layout in candidate_layouts(11, 2, 12) {
                let fan = apply_layout(&big, &layout, 11).unwrap();
                assert_exact(&fan);
                assert_exact(&optimize(&fan, &DiagnosticSink::new()).unwrap());
            }
        }
    }

    #[test]
    fn eleven_into_fifteen_picks_minimum() {
        for (big, clustered) in [
            (build_folded_bias(15).unwrap().fan, 10),
            (build_baseline(15).unwrap().fan, 14),
        ] {
            let sink = DiagnosticSink::new();
            let choice = search_layouts(11, &big, 2, 12, &sink).unwrap();
            assert_eq!(choice.scores.len(), 16);
            assert_eq!(choice.scores[0].label, "clustered");
            assert_eq!(choice.scores[0].adders, clustered);

            let min = choice.scores.iter().map(|s| s.adders).min().unwrap();
            assert_eq!(choice.score, min);
            assert!(choice.score <= clustered);
            let first = choice.scores.iter().find(|s| s.adders == min).unwrap();
            assert_eq!(first.label, choice.layout.label);
            assert_eq!(choice.fan.adder_count(), choice.score);
            assert_exact(&choice.fan);

            assert_eq!(sink.codes().len(), 1);
            assert_eq!(sink.codes()[0].to_string(), "L401");
        }
    }

    #[test]
    fn search_reproducible() {
        let big = build_folded_bias(13).unwrap().fan;
        let sink = DiagnosticSink::new();
        let first = search_layouts(11, &big, 1, 12, &sink).unwrap();
        let second = search_layouts(11, &big, 1, 12, &sink).unwrap();
        assert_eq!(first.layout, second.layout);
        assert_eq!(first.fan, second.fan);
        assert_eq!(first.scores, second.scores);
    }

    #[test]
    fn zero_pairs_warns() {
        let big = build_folded_bias(7).unwrap().fan;
        let sink = DiagnosticSink::new();
        let choice = search_layouts(7, &big, 0, 12, &sink).unwrap();
        assert_eq!(choice.layout.label, "identity");
        assert_eq!(choice.score, 4);
        let codes: Vec<String> = sink.codes().iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, vec!["W201", "L401"]);
    }
}
