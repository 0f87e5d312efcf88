//! Sector rotation model: industry allocation from prosperity scores.
//!
//! Industry scores are normalized (z-score, then min-max into [0, 1]),
//! ranked, and turned into a top-heavy allocation; optional fund flows and
//! policy signals then adjust the weights with a renormalization after each
//! adjustment category.

use crate::ModelError;
use hobart_core::{stats, AdditionalFactors, Allocation, IndustryScore, ModelResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for [`SectorRotationModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorRotationConfig {
    /// Fixed weights for the top three ranked industries (default:
    /// 0.4 / 0.3 / 0.2); the remainder of 1.0 is split evenly across the
    /// rest.
    pub top_weights: [f64; 3],
    /// Multiplier turning a raw fund flow into a weight delta
    /// (default: 0.1).
    pub flow_scale: f64,
    /// Absolute cap on a single fund-flow delta (default: 0.2).
    pub flow_cap: f64,
    /// Multiplier applied to policy-supported industries (default: 1.2).
    pub policy_boost: f64,
    /// Cap on any single industry weight before renormalization when
    /// policy or seasonal boosts apply (default: 0.5).
    pub boost_cap: f64,
}

impl Default for SectorRotationConfig {
    fn default() -> Self {
        Self {
            top_weights: [0.4, 0.3, 0.2],
            flow_scale: 0.1,
            flow_cap: 0.2,
            policy_boost: 1.2,
            boost_cap: 0.5,
        }
    }
}

/// Heuristic sector rotation model producing industry allocations.
#[derive(Debug, Clone)]
pub struct SectorRotationModel {
    config: SectorRotationConfig,
}

impl SectorRotationModel {
    /// Model name and version attached to every result for audit purposes.
    pub const MODEL_NAME: &'static str = "SectorRotationModel_v1.0";

    /// Creates a model with the given configuration.
    pub fn new(config: SectorRotationConfig) -> Result<Self, ModelError> {
        if config.top_weights.iter().any(|&w| !(0.0..=1.0).contains(&w)) {
            return Err(ModelError::InvalidParameter(
                "top weights must be between 0 and 1".to_string(),
            ));
        }
        if config.top_weights.windows(2).any(|pair| pair[0] < pair[1]) {
            return Err(ModelError::InvalidParameter(
                "top weights must be non-increasing".to_string(),
            ));
        }
        let assigned: f64 = config.top_weights.iter().sum();
        if assigned > 1.0 {
            return Err(ModelError::UnnormalizedWeights(assigned));
        }
        if config.flow_scale < 0.0 || config.flow_cap < 0.0 {
            return Err(ModelError::InvalidParameter(
                "flow scale and cap must be non-negative".to_string(),
            ));
        }
        if config.policy_boost <= 0.0 || !(0.0..=1.0).contains(&config.boost_cap) {
            return Err(ModelError::InvalidParameter(
                "policy boost must be positive and boost cap between 0 and 1".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Current configuration.
    pub const fn config(&self) -> &SectorRotationConfig {
        &self.config
    }

    /// Recommends an industry allocation.
    ///
    /// Empty `industry_scores` is the one explicit early exit: the result
    /// carries an empty allocation and zero confidence. Ties in the
    /// normalized scores keep the input order.
    pub fn allocate(
        &self,
        industry_scores: &[IndustryScore],
        fund_flows: &BTreeMap<String, f64>,
        additional_factors: &AdditionalFactors,
    ) -> ModelResult<Allocation> {
        if industry_scores.is_empty() {
            return ModelResult::new(
                Self::MODEL_NAME,
                Allocation::new(),
                "No industry scores provided.",
                0.0,
            );
        }

        let raw: Vec<f64> = industry_scores.iter().map(|s| s.score).collect();
        let normalized = stats::normalize_scores(&raw);

        let mut ranked: Vec<(&str, f64)> = industry_scores
            .iter()
            .zip(&normalized)
            .map(|(s, &score)| (s.industry.as_str(), score))
            .collect();
        // Stable sort: equal scores keep input order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut allocation = Allocation::new();
        let mut assigned = 0.0;
        for (i, &(industry, _)) in ranked.iter().take(3).enumerate() {
            allocation.set(industry, self.config.top_weights[i]);
            assigned += self.config.top_weights[i];
        }
        let rest = &ranked[ranked.len().min(3)..];
        if !rest.is_empty() {
            let per_industry = (1.0 - assigned) / rest.len() as f64;
            for &(industry, _) in rest {
                allocation.set(industry, per_industry);
            }
        }

        if !fund_flows.is_empty() {
            self.apply_fund_flows(&mut allocation, fund_flows);
        }
        self.apply_additional_factors(&mut allocation, additional_factors);

        let top_names: Vec<&str> = ranked.iter().take(3).map(|&(industry, _)| industry).collect();
        let reasoning = format!(
            "Industry prosperity scores favor the leading sectors: {}.",
            top_names.join(", ")
        );

        let confidence = if ranked.len() >= 3 {
            (0.7 + (ranked[0].1 - ranked[2].1) * 0.5).min(0.95)
        } else {
            0.6
        };

        ModelResult::new(Self::MODEL_NAME, allocation, reasoning, confidence)
    }

    /// Inflows add weight, outflows remove it, each delta clamped to
    /// `flow_cap` and floored at zero, then the allocation renormalizes.
    fn apply_fund_flows(&self, allocation: &mut Allocation, fund_flows: &BTreeMap<String, f64>) {
        for (industry, flow) in fund_flows {
            if allocation.contains(industry) {
                let delta =
                    (flow * self.config.flow_scale).clamp(-self.config.flow_cap, self.config.flow_cap);
                allocation.nudge(industry, delta);
            }
        }
        allocation.renormalize();
    }

    fn apply_additional_factors(&self, allocation: &mut Allocation, factors: &AdditionalFactors) {
        if let Some(supported) = factors.string_list("policy_support") {
            for industry in supported {
                allocation.scale_capped(industry, self.config.policy_boost, self.config.boost_cap);
            }
            allocation.renormalize();
        }
        if let Some(seasonal) = factors.numeric_map("seasonal_factor") {
            for (industry, multiplier) in seasonal {
                allocation.scale_capped(industry, multiplier, self.config.boost_cap);
            }
            allocation.renormalize();
        }
    }
}

impl Default for SectorRotationModel {
    fn default() -> Self {
        Self {
            config: SectorRotationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn scores(pairs: &[(&str, f64)]) -> Vec<IndustryScore> {
        pairs
            .iter()
            .map(|&(industry, score)| IndustryScore::new(industry, score))
            .collect()
    }

    #[test]
    fn empty_input_returns_empty_zero_confidence_result() {
        let model = SectorRotationModel::default();
        let result = model.allocate(&[], &BTreeMap::new(), &AdditionalFactors::new());

        assert!(result.output.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.reasoning, "No industry scores provided.");
        assert_eq!(result.model, SectorRotationModel::MODEL_NAME);
    }

    #[test]
    fn equal_scores_rank_by_input_order() {
        let model = SectorRotationModel::default();
        let input = scores(&[
            ("Tech", 10.0),
            ("Health", 10.0),
            ("Energy", 10.0),
            ("Finance", 10.0),
        ]);
        let result = model.allocate(&input, &BTreeMap::new(), &AdditionalFactors::new());

        assert_relative_eq!(result.output.weight("Tech"), 0.4);
        assert_relative_eq!(result.output.weight("Health"), 0.3);
        assert_relative_eq!(result.output.weight("Energy"), 0.2);
        assert_relative_eq!(result.output.weight("Finance"), 0.1, epsilon = 1e-12);
        assert_relative_eq!(result.output.total(), 1.0, epsilon = 1e-9);
        // Zero spread between rank 1 and rank 3, so the >=3 branch
        // degenerates to exactly 0.7 (not the <3 fallback of 0.6).
        assert_relative_eq!(result.confidence, 0.7);
    }

    #[test]
    fn distinct_scores_rank_descending() {
        let model = SectorRotationModel::default();
        let input = scores(&[
            ("Utilities", 2.0),
            ("Tech", 9.0),
            ("Energy", 5.0),
            ("Health", 7.0),
            ("Materials", 1.0),
        ]);
        let result = model.allocate(&input, &BTreeMap::new(), &AdditionalFactors::new());

        assert_relative_eq!(result.output.weight("Tech"), 0.4);
        assert_relative_eq!(result.output.weight("Health"), 0.3);
        assert_relative_eq!(result.output.weight("Energy"), 0.2);
        assert_relative_eq!(result.output.weight("Utilities"), 0.05, epsilon = 1e-12);
        assert_relative_eq!(result.output.weight("Materials"), 0.05, epsilon = 1e-12);
        assert_relative_eq!(result.output.total(), 1.0, epsilon = 1e-9);
        assert!(result.reasoning.contains("Tech, Health, Energy"));
    }

    #[test]
    fn confidence_grows_with_top_spread_and_caps_at_095() {
        let model = SectorRotationModel::default();
        let spread = model.allocate(
            &scores(&[("A", 100.0), ("B", 1.0), ("C", 0.5), ("D", 0.1)]),
            &BTreeMap::new(),
            &AdditionalFactors::new(),
        );
        assert!(spread.confidence > 0.7);
        assert!(spread.confidence <= 0.95);
    }

    #[test]
    fn fewer_than_three_industries_uses_fallback_confidence() {
        let model = SectorRotationModel::default();
        let result = model.allocate(
            &scores(&[("Tech", 3.0), ("Energy", 1.0)]),
            &BTreeMap::new(),
            &AdditionalFactors::new(),
        );

        assert_relative_eq!(result.output.weight("Tech"), 0.4);
        assert_relative_eq!(result.output.weight("Energy"), 0.3);
        assert_eq!(result.output.len(), 2);
        assert_relative_eq!(result.confidence, 0.6);
    }

    #[test]
    fn fund_flows_tilt_weights_and_renormalize() {
        let model = SectorRotationModel::default();
        let input = scores(&[("Tech", 9.0), ("Health", 7.0), ("Energy", 5.0), ("Autos", 3.0)]);
        let mut flows = BTreeMap::new();
        flows.insert("Energy".to_string(), 3.0); // clamped to +0.2
        flows.insert("Tech".to_string(), -5.0); // clamped to -0.2
        flows.insert("Unlisted".to_string(), 4.0); // ignored

        let result = model.allocate(&input, &flows, &AdditionalFactors::new());
        let baseline = model.allocate(&input, &BTreeMap::new(), &AdditionalFactors::new());

        assert!(result.output.weight("Energy") > baseline.output.weight("Energy"));
        assert!(result.output.weight("Tech") < baseline.output.weight("Tech"));
        assert!(!result.output.contains("Unlisted"));
        assert_relative_eq!(result.output.total(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn outflow_floors_weight_at_zero_before_renormalizing() {
        let model = SectorRotationModel::default();
        let input = scores(&[("Tech", 9.0), ("Health", 7.0), ("Energy", 5.0), ("Autos", 3.0)]);
        let mut flows = BTreeMap::new();
        flows.insert("Autos".to_string(), -9.0);

        let result = model.allocate(&input, &flows, &AdditionalFactors::new());
        assert_eq!(result.output.weight("Autos"), 0.0);
        assert_relative_eq!(result.output.total(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn policy_support_boosts_named_industries() {
        let model = SectorRotationModel::default();
        let input = scores(&[("Tech", 9.0), ("Health", 7.0), ("Energy", 5.0), ("Autos", 3.0)]);
        let mut factors = AdditionalFactors::new();
        factors.insert("policy_support", json!(["Energy", "Autos"]));

        let result = model.allocate(&input, &BTreeMap::new(), &factors);
        let baseline = model.allocate(&input, &BTreeMap::new(), &AdditionalFactors::new());

        assert!(result.output.weight("Energy") > baseline.output.weight("Energy"));
        assert_relative_eq!(result.output.total(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn seasonal_factors_scale_named_industries() {
        let model = SectorRotationModel::default();
        let input = scores(&[("Retail", 9.0), ("Coal", 7.0), ("Travel", 5.0), ("Autos", 3.0)]);
        let mut factors = AdditionalFactors::new();
        factors.insert("seasonal_factor", json!({"Retail": 1.4, "Coal": 0.6}));

        let result = model.allocate(&input, &BTreeMap::new(), &factors);
        let baseline = model.allocate(&input, &BTreeMap::new(), &AdditionalFactors::new());

        assert!(result.output.weight("Retail") > baseline.output.weight("Retail"));
        assert!(result.output.weight("Coal") < baseline.output.weight("Coal"));
        assert_relative_eq!(result.output.total(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn determinism_bitwise() {
        let model = SectorRotationModel::default();
        let input = scores(&[("Tech", 9.0), ("Health", 7.0), ("Energy", 5.0)]);
        let mut flows = BTreeMap::new();
        flows.insert("Tech".to_string(), 1.5);

        let a = model.allocate(&input, &flows, &AdditionalFactors::new());
        let b = model.allocate(&input, &flows, &AdditionalFactors::new());
        assert_eq!(a, b);
    }

    #[test]
    fn config_validation_rejects_increasing_top_weights() {
        let config = SectorRotationConfig {
            top_weights: [0.2, 0.3, 0.4],
            ..Default::default()
        };
        assert!(SectorRotationModel::new(config).is_err());

        let config = SectorRotationConfig {
            top_weights: [0.6, 0.5, 0.4],
            ..Default::default()
        };
        assert!(matches!(
            SectorRotationModel::new(config),
            Err(ModelError::UnnormalizedWeights(_))
        ));
    }
}
