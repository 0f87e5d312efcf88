#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use hobart_core as core;
pub use hobart_models as models;

pub use hobart_core::{
    AdditionalFactors, Allocation, AssetClass, EconomicCycle, IndustryScore, MarketRegime,
    MarketSentiment, ModelResult, RankedSecurity, SecurityFactors,
};
pub use hobart_models::{
    FactorRanking, MacroTimingModel, ModelError, MultiFactorModel, SectorRotationModel,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn models_are_reachable_through_the_facade() {
        let result = MacroTimingModel::default().allocate(
            "recovery",
            "neutral",
            &AdditionalFactors::new(),
        );
        assert!((result.output.total() - 1.0).abs() <= 0.01);
    }
}
