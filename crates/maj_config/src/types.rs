//! Configuration types deserialized from `majsynth.toml`.

use serde::{Deserialize, Serialize};

/// Largest majority width accepted by the loader and the synthesizers.
pub const MAX_WIDTH: u32 = 65_535;

/// Default number of seeded random layouts tried by the scaffold search.
pub const DEFAULT_RANDOM_TRIALS: u32 = 12;

/// Upper bound on seeded random layouts, keeping the search bounded-time.
pub const MAX_RANDOM_TRIALS: u32 = 64;

/// The top-level run configuration parsed from `majsynth.toml`.
///
/// Only `[synth]` is required; every other section falls back to the
/// defaults of the reference flow (both direct variants, majority-only
/// emission, minimal scaffold with twelve random layouts).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SynthConfig {
    /// Core synthesis parameters (input width).
    pub synth: SynthSection,
    /// Which design variants to build.
    #[serde(default)]
    pub variants: VariantSelection,
    /// Scaffold embedding search settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Two-level emission settings.
    #[serde(default)]
    pub emit: EmitConfig,
}

impl SynthConfig {
    /// Creates a configuration for `width` inputs with all other settings defaulted.
    pub fn for_width(width: u32) -> Self {
        Self {
            synth: SynthSection { width },
            variants: VariantSelection::default(),
            search: SearchConfig::default(),
            emit: EmitConfig::default(),
        }
    }
}

/// The `[synth]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SynthSection {
    /// Number of majority inputs; odd, at least 3 and at most [`MAX_WIDTH`].
    pub width: u32,
}

/// The `[variants]` section: one toggle per generated design.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct VariantSelection {
    /// Bias-folded carry-save design (`maj_fb_<n>`).
    #[serde(default = "enabled")]
    pub folded_bias: bool,
    /// Strict threshold-comparator baseline (`maj_baseline_strict_<n>`).
    #[serde(default = "enabled")]
    pub baseline_strict: bool,
    /// Bias-folded design embedded in a larger scaffold (`maj_fb_majpath_<n>`).
    #[serde(default)]
    pub scaffold_folded_bias: bool,
    /// Baseline design embedded in a larger scaffold (`maj_baseline_majpath_<n>`).
    #[serde(default)]
    pub scaffold_baseline: bool,
}

fn enabled() -> bool {
    true
}

impl Default for VariantSelection {
    fn default() -> Self {
        Self {
            folded_bias: true,
            baseline_strict: true,
            scaffold_folded_bias: false,
            scaffold_baseline: false,
        }
    }
}

/// The `[search]` section controlling scaffold embedding.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// How the larger scaffold network is sized.
    #[serde(default)]
    pub target: ScaffoldTarget,
    /// Number of seeded random layouts tried after the fixed heuristics.
    #[serde(default = "default_random_trials")]
    pub random_trials: u32,
}

fn default_random_trials() -> u32 {
    DEFAULT_RANDOM_TRIALS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target: ScaffoldTarget::default(),
            random_trials: DEFAULT_RANDOM_TRIALS,
        }
    }
}

/// Sizing policy for the scaffold a width is embedded into.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScaffoldTarget {
    /// Embed into `n + 2` inputs with a single 1/0 constant pair (default).
    #[default]
    Minimal,
    /// Embed into the next `2^p - 1` inputs, padding with as many pairs as needed.
    PowerOfTwo,
}

/// The `[emit]` section.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EmitConfig {
    /// Gate basis each full adder is lowered into.
    #[serde(default)]
    pub basis: GateBasis,
}

/// Gate basis for canonical two-level lowering of a full adder.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GateBasis {
    /// Three 3-input majority gates per adder, complements folded into truth tables (default).
    #[default]
    MajorityOnly,
    /// One 3-input odd-parity gate for the sum, one majority gate for the carry.
    Mixed,
}
