//! Optimization pass runner and pass trait.
//!
//! Provides the [`OptPass`] trait for implementing optimization passes and
//! the [`optimize`] function that runs them in the standard order.

use crate::error::SynthError;
use maj_diagnostics::DiagnosticSink;
use maj_fan::Fan;

/// Trait for a single optimization pass.
///
/// Each pass reads a network and returns a new one; the input is never
/// modified. Every pass is idempotent.
pub(crate) trait OptPass {
    /// Short pass name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Runs the pass, returning the rewritten network.
    fn run(&self, fan: &Fan, sink: &DiagnosticSink) -> Result<Fan, SynthError>;
}

/// Runs all optimization passes on `fan` in the standard order.
///
/// The order is constant folding, then dead-code elimination. Removed-adder
/// counts are reported as notes on `sink`.
pub fn optimize(fan: &Fan, sink: &DiagnosticSink) -> Result<Fan, SynthError> {
    let passes: [&dyn OptPass; 2] = [&crate::const_prop::ConstFoldPass, &crate::dce::DcePass];

    let mut current = fan.clone();
    for pass in passes {
        current = pass.run(&current, sink)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::build_baseline;
    use crate::bias::build_folded_bias;

    #[test]
    fn optimize_empty_network() {
        let sink = DiagnosticSink::new();
        let fan = Fan::new(3);
        let out = optimize(&fan, &sink).unwrap();
        assert_eq!(out.adder_count(), 0);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn folded_bias_is_already_minimal() {
        let sink = DiagnosticSink::new();
        for n in [3, 5, 7, 9, 11, 13, 15] {
            let raw = build_folded_bias(n).unwrap().fan;
            let opt = optimize(&raw, &sink).unwrap();
            assert_eq!(opt.adder_count(), raw.adder_count(), "n={n}");
        }
    }

    #[test]
    fn baseline_padding_folds_away() {
        let sink = DiagnosticSink::new();
        for (n, expected) in [(3, 3), (5, 7), (9, 13), (11, 14), (15, 15)] {
            let raw = build_baseline(n).unwrap().fan;
            let opt = optimize(&raw, &sink).unwrap();
            assert_eq!(opt.adder_count(), expected, "n={n}");
            assert_eq!(opt.validate(), Ok(()));
            for word in 0..(1u64 << n) {
                assert_eq!(
                    opt.evaluate_word(word).unwrap(),
                    raw.evaluate_word(word).unwrap(),
                    "n={n} word={word:b}"
                );
            }
        }
    }

    #[test]
    fn idempotent() {
        let sink = DiagnosticSink::new();
        for n in [9, 11] {
            let once = optimize(&build_baseline(n).unwrap().fan, &sink).unwrap();
            let twice = optimize(&once, &sink).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn input_is_untouched() {
        let sink = DiagnosticSink::new();
        let raw = build_baseline(9).unwrap().fan;
        let before = raw.clone();
        let _ = optimize(&raw, &sink).unwrap();
        assert_eq!(raw, before);
    }
}
