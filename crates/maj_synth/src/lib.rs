//! Majority-function synthesis engine.
//!
//! This crate builds full-adder networks computing the `n`-input majority
//! function and lowers them into canonical two-level gate models ready for an
//! external netlist writer.
//!
//! Each design variant goes through the same pipeline:
//! 1. **Construction**: bias folding or a threshold-comparator baseline,
//!    optionally built at a larger width and specialized by a layout search
//! 2. **Optimization**: constant folding and dead-code elimination
//! 3. **Emission**: each adder lowered to 3-input majority (or parity) gates
//!
//! # Usage
//!
//! ```ignore
//! use maj_synth::synthesize;
//! let report = synthesize(&config, &sink)?;
//! ```

#![warn(missing_docs)]

pub mod baseline;
pub mod bias;
pub mod canonical;
mod const_prop;
mod dce;
pub mod error;
mod optimize;
pub mod scaffold;
pub mod scheduler;
pub mod stats;

pub use canonical::{emit_logic, LogicModel};
pub use error::SynthError;
pub use optimize::optimize;
pub use stats::DesignStats;

use maj_config::{
    GateBasis, ScaffoldTarget, SynthConfig, VariantSelection, DEFAULT_RANDOM_TRIALS, MAX_WIDTH,
};
use maj_diagnostics::DiagnosticSink;
use maj_fan::Fan;
use scaffold::{apply_layout, search_layouts, Layout, ScaffoldPlan};
use serde::{Deserialize, Serialize};

/// One of the generated design variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    /// Carry-save fold with the threshold bias injected as constants.
    FoldedBias,
    /// Carry-save popcount followed by a ripple comparator.
    BaselineStrict,
    /// [`VariantKind::FoldedBias`] built at a larger width and specialized.
    ScaffoldFoldedBias,
    /// [`VariantKind::BaselineStrict`] built at a larger width and specialized.
    ScaffoldBaseline,
}

impl VariantKind {
    /// Every variant, in generation order.
    pub const ALL: [VariantKind; 4] = [
        VariantKind::FoldedBias,
        VariantKind::BaselineStrict,
        VariantKind::ScaffoldFoldedBias,
        VariantKind::ScaffoldBaseline,
    ];

    /// Returns the logic model name for width `n`.
    pub fn model_name(self, n: u32) -> String {
        match self {
            VariantKind::FoldedBias => format!("maj_fb_{n}"),
            VariantKind::BaselineStrict => format!("maj_baseline_strict_{n}"),
            VariantKind::ScaffoldFoldedBias => format!("maj_fb_majpath_{n}"),
            VariantKind::ScaffoldBaseline => format!("maj_baseline_majpath_{n}"),
        }
    }

    /// Returns `true` if the variant is toggled on in `selection`.
    pub fn enabled_in(self, selection: &VariantSelection) -> bool {
        match self {
            VariantKind::FoldedBias => selection.folded_bias,
            VariantKind::BaselineStrict => selection.baseline_strict,
            VariantKind::ScaffoldFoldedBias => selection.scaffold_folded_bias,
            VariantKind::ScaffoldBaseline => selection.scaffold_baseline,
        }
    }

    /// Returns `true` for the scaffold-embedded variants.
    pub fn is_scaffold(self) -> bool {
        matches!(
            self,
            VariantKind::ScaffoldFoldedBias | VariantKind::ScaffoldBaseline
        )
    }
}

/// Settings shared by every variant of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthOptions {
    /// Gate basis for emission.
    pub basis: GateBasis,
    /// Scaffold sizing policy.
    pub target: ScaffoldTarget,
    /// Seeded random layouts tried by the scaffold search.
    pub random_trials: u32,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            basis: GateBasis::default(),
            target: ScaffoldTarget::default(),
            random_trials: DEFAULT_RANDOM_TRIALS,
        }
    }
}

impl From<&SynthConfig> for SynthOptions {
    fn from(config: &SynthConfig) -> Self {
        Self {
            basis: config.emit.basis,
            target: config.search.target,
            random_trials: config.search.random_trials,
        }
    }
}

/// A fully synthesized design variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedDesign {
    /// Which variant this is.
    pub kind: VariantKind,
    /// Logic model name.
    pub name: String,
    /// The network before optimization.
    pub raw: Fan,
    /// The network after optimization.
    pub optimized: Fan,
    /// The canonical two-level model of `optimized`.
    pub logic: LogicModel,
    /// Size and depth statistics.
    pub stats: DesignStats,
    /// The chosen input layout, for scaffold variants.
    pub layout: Option<Layout>,
}

/// A variant that failed to synthesize.
#[derive(Debug)]
pub struct VariantFailure {
    /// The failed variant.
    pub kind: VariantKind,
    /// Why it failed.
    pub error: SynthError,
}

/// The outcome of a synthesis run.
#[derive(Debug)]
pub struct SynthesisReport {
    /// Majority width.
    pub width: u32,
    /// Successfully synthesized variants, in generation order.
    pub designs: Vec<SynthesizedDesign>,
    /// Variants that failed; they never block the others.
    pub failures: Vec<VariantFailure>,
}

impl SynthesisReport {
    /// Returns the design of the given variant, if it was synthesized.
    pub fn design(&self, kind: VariantKind) -> Option<&SynthesizedDesign> {
        self.designs.iter().find(|d| d.kind == kind)
    }
}

/// Checks that `n` is an odd integer between 3 and [`MAX_WIDTH`].
pub fn validate_width(n: u32) -> Result<(), SynthError> {
    if !(3..=MAX_WIDTH).contains(&n) || n % 2 == 0 {
        return Err(SynthError::InvalidWidth(n));
    }
    Ok(())
}

/// Synthesizes every variant enabled in `config`.
///
/// An invalid width is reported on `sink` and returned as an error. Otherwise
/// each variant is built independently: a failure is reported on `sink` and
/// recorded in [`SynthesisReport::failures`].
pub fn synthesize(
    config: &SynthConfig,
    sink: &DiagnosticSink,
) -> Result<SynthesisReport, SynthError> {
    let n = config.synth.width;
    if let Err(err) = validate_width(n) {
        sink.emit(err.to_diagnostic());
        return Err(err);
    }

    let options = SynthOptions::from(config);
    let mut report = SynthesisReport {
        width: n,
        designs: Vec::new(),
        failures: Vec::new(),
    };
    for kind in VariantKind::ALL {
        if !kind.enabled_in(&config.variants) {
            continue;
        }
        match synthesize_variant(kind, n, &options, sink) {
            Ok(design) => report.designs.push(design),
            Err(error) => {
                sink.emit(error.to_diagnostic().with_subject(kind.model_name(n)));
                report.failures.push(VariantFailure { kind, error });
            }
        }
    }
    Ok(report)
}

/// Synthesizes one variant: build, validate, optimize, validate, emit.
pub fn synthesize_variant(
    kind: VariantKind,
    n: u32,
    options: &SynthOptions,
    sink: &DiagnosticSink,
) -> Result<SynthesizedDesign, SynthError> {
    validate_width(n)?;
    let built = build_raw(kind, n, options, sink)?;
    built.fan.validate()?;

    let optimized = optimize(&built.fan, sink)?;
    optimized.validate()?;

    let name = kind.model_name(n);
    let logic = emit_logic(&name, &optimized, options.basis);
    let stats = DesignStats {
        comparator_width: built.comparator_width,
        bias: built.bias,
        comparator_adders: built.comparator_adders,
        scaffold_width: built.scaffold.map(|plan| plan.scaffold_width),
        scaffold_threshold: built.scaffold.map(|plan| plan.scaffold_width / 2 + 1),
        constant_pairs: built.scaffold.map(|plan| plan.pairs),
        layout: built.layout.as_ref().map(|l| l.label.clone()),
        ..DesignStats::measure(n, &built.fan, &optimized)
    };

    Ok(SynthesizedDesign {
        kind,
        name,
        raw: built.fan,
        optimized,
        logic,
        stats,
        layout: built.layout,
    })
}

/// An unoptimized network and the parameters it was built with.
///
/// For scaffold variants the parameters are those of the scaffold network.
struct RawDesign {
    fan: Fan,
    comparator_width: u32,
    bias: Option<u64>,
    comparator_adders: usize,
    scaffold: Option<ScaffoldPlan>,
    layout: Option<Layout>,
}

fn build_raw(
    kind: VariantKind,
    n: u32,
    options: &SynthOptions,
    sink: &DiagnosticSink,
) -> Result<RawDesign, SynthError> {
    match kind {
        VariantKind::FoldedBias => {
            let net = bias::build_folded_bias(n)?;
            Ok(RawDesign {
                fan: net.fan,
                comparator_width: net.params.comparator_width,
                bias: Some(net.params.bias),
                comparator_adders: 0,
                scaffold: None,
                layout: None,
            })
        }
        VariantKind::BaselineStrict => {
            let net = baseline::build_baseline(n)?;
            Ok(RawDesign {
                fan: net.fan,
                comparator_width: net.params.scaffold_bits,
                bias: None,
                comparator_adders: net.comparator_adders,
                scaffold: None,
                layout: None,
            })
        }
        VariantKind::ScaffoldFoldedBias | VariantKind::ScaffoldBaseline => {
            let plan = ScaffoldPlan::new(n, options.target)?;
            let base = if kind == VariantKind::ScaffoldFoldedBias {
                VariantKind::FoldedBias
            } else {
                VariantKind::BaselineStrict
            };
            let big = build_raw(base, plan.scaffold_width, options, sink)?;
            let choice = search_layouts(
                n,
                &big.fan,
                i64::from(plan.pairs),
                options.random_trials,
                sink,
            )?;
            Ok(RawDesign {
                fan: apply_layout(&big.fan, &choice.layout, n)?,
                scaffold: Some(plan),
                layout: Some(choice.layout),
                ..big
            })
        }
    }
}
