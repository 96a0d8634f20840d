//! Size and depth statistics for synthesized designs.

use maj_fan::Fan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of one synthesized design.
///
/// Depth is the largest number of adders on any path from an input to an
/// adder output; inputs and constants sit at level 0.
///
/// `comparator_width` and `bias` describe the network that was actually
/// built. For embedded designs that is the scaffold network, so they belong
/// with `scaffold_width` and `scaffold_threshold` rather than with `width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignStats {
    /// Number of majority inputs.
    pub width: u32,
    /// Minimum number of ones among the `width` inputs for a true decision.
    pub threshold: u32,
    /// Columns folded before the decision (`w`), or the comparator length
    /// (`p`), of the built network.
    pub comparator_width: u32,
    /// Constant folded into the built network's population count; `None` for
    /// comparator designs.
    pub bias: Option<u64>,
    /// Adders before optimization.
    pub raw_adders: usize,
    /// Adders after optimization.
    pub optimized_adders: usize,
    /// Ripple-comparator adders in the raw network.
    pub comparator_adders: usize,
    /// Depth before optimization.
    pub raw_depth: u32,
    /// Depth after optimization.
    pub optimized_depth: u32,
    /// Width of the scaffold network, for embedded designs.
    pub scaffold_width: Option<u32>,
    /// Majority threshold of the scaffold network, for embedded designs.
    pub scaffold_threshold: Option<u32>,
    /// Number of 1/0 fixing pairs, for embedded designs.
    pub constant_pairs: Option<u32>,
    /// Label of the chosen layout, for embedded designs.
    pub layout: Option<String>,
}

impl DesignStats {
    /// Measures the adder counts and depths of a raw/optimized network pair.
    ///
    /// Design parameters are left at zero or `None` for the caller to fill in.
    pub fn measure(width: u32, raw: &Fan, optimized: &Fan) -> Self {
        Self {
            width,
            threshold: width / 2 + 1,
            comparator_width: 0,
            bias: None,
            raw_adders: raw.adder_count(),
            optimized_adders: optimized.adder_count(),
            comparator_adders: 0,
            raw_depth: raw.depth(),
            optimized_depth: optimized.depth(),
            scaffold_width: None,
            scaffold_threshold: None,
            constant_pairs: None,
            layout: None,
        }
    }
}

impl fmt::Display for DesignStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} threshold={} adders={}->{} depth={}->{}",
            self.width,
            self.threshold,
            self.raw_adders,
            self.optimized_adders,
            self.raw_depth,
            self.optimized_depth
        )?;
        if let (Some(width), Some(layout)) = (self.scaffold_width, &self.layout) {
            write!(f, " scaffold={width} layout={layout}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::build_baseline;

    #[test]
    fn measure_baseline() {
        let raw = build_baseline(3).unwrap().fan;
        let stats = DesignStats::measure(3, &raw, &raw);
        assert_eq!(stats.threshold, 2);
        assert_eq!(stats.raw_adders, 3);
        assert_eq!(stats.raw_depth, 3);
        assert_eq!(stats.to_string(), "n=3 threshold=2 adders=3->3 depth=3->3");
    }

    #[test]
    fn threshold_at_maximum_width() {
        let raw = Fan::new(0);
        let stats = DesignStats::measure(u32::MAX, &raw, &raw);
        assert_eq!(stats.threshold, 1 << 31);
        let stats = DesignStats::measure(maj_config::MAX_WIDTH, &raw, &raw);
        assert_eq!(stats.threshold, 32_768);
    }

    #[test]
    fn display_with_scaffold() {
        let raw = Fan::new(5);
        let stats = DesignStats {
            scaffold_width: Some(7),
            layout: Some("clustered".into()),
            ..DesignStats::measure(5, &raw, &raw)
        };
        assert_eq!(
            stats.to_string(),
            "n=5 threshold=3 adders=0->0 depth=0->0 scaffold=7 layout=clustered"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let raw = build_baseline(5).unwrap().fan;
        let stats = DesignStats::measure(5, &raw, &raw);
        let json = serde_json::to_string(&stats).unwrap();
        let back: DesignStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, back);
    }
}
