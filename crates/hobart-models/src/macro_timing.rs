//! Macro timing model: asset-class allocation from cycle and sentiment.
//!
//! The model composes three scores — economic cycle, market sentiment, and
//! an averaged adjustment from recognized auxiliary factors — into a single
//! composite, picks one of four fixed allocation stances by threshold, and
//! then applies bounded factor nudges before renormalizing.

use crate::ModelError;
use hobart_core::allocation::SUM_TOLERANCE;
use hobart_core::{AdditionalFactors, Allocation, AssetClass, EconomicCycle, MarketSentiment, ModelResult};
use serde::{Deserialize, Serialize};

/// Ordered scoring rules over the recognized auxiliary-factor keys.
///
/// Each rule yields `Some(delta)` when its key is present and usable; the
/// deltas are averaged over the number of rules that fired. Unrecognized
/// keys are simply never visited.
const SCORE_RULES: &[(&str, fn(&AdditionalFactors) -> Option<f64>)] = &[
    ("interest_rate", |f| {
        f.numeric("interest_rate").map(|rate| {
            if rate < 2.0 {
                0.2
            } else if rate > 5.0 {
                -0.2
            } else {
                0.0
            }
        })
    }),
    ("inflation", |f| {
        f.numeric("inflation").map(|inflation| {
            if inflation < 2.0 {
                0.1
            } else if inflation > 4.0 {
                0.1
            } else {
                0.0
            }
        })
    }),
    // Exchange-rate volatility counts on presence alone.
    ("exchange_rate", |f| f.contains("exchange_rate").then_some(0.05)),
    ("geopolitical_risk", |f| {
        f.numeric("geopolitical_risk")
            .map(|risk| if risk > 0.7 { -0.2 } else { 0.0 })
    }),
];

/// One bounded reallocation triggered by an auxiliary factor.
struct NudgeRule {
    key: &'static str,
    triggers: fn(f64) -> bool,
    from: AssetClass,
    to: AssetClass,
    amount: f64,
    to_cap: f64,
    from_floor: f64,
}

/// Ordered nudge rules applied after the stance template is chosen.
const NUDGE_RULES: &[NudgeRule] = &[
    // High rates favor bonds over equities.
    NudgeRule {
        key: "interest_rate",
        triggers: |rate| rate > 5.0,
        from: AssetClass::Stock,
        to: AssetClass::Bond,
        amount: 0.1,
        to_cap: 0.7,
        from_floor: 0.1,
    },
    // High inflation favors commodities over cash.
    NudgeRule {
        key: "inflation",
        triggers: |inflation| inflation > 4.0,
        from: AssetClass::Cash,
        to: AssetClass::Commodity,
        amount: 0.05,
        to_cap: 0.2,
        from_floor: 0.05,
    },
    // Elevated geopolitical risk favors cash over equities.
    NudgeRule {
        key: "geopolitical_risk",
        triggers: |risk| risk > 0.7,
        from: AssetClass::Stock,
        to: AssetClass::Cash,
        amount: 0.1,
        to_cap: 0.3,
        from_floor: 0.05,
    },
];

/// Allocation stance selected from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stance {
    Aggressive,
    Balanced,
    Defensive,
    Conservative,
}

impl Stance {
    fn from_composite(composite: f64) -> Self {
        if composite >= 0.7 {
            Self::Aggressive
        } else if composite >= 0.5 {
            Self::Balanced
        } else if composite >= 0.3 {
            Self::Defensive
        } else {
            Self::Conservative
        }
    }

    /// Fixed weight template over the four asset classes; each sums to 1.0.
    const fn template(self) -> [(AssetClass, f64); 4] {
        match self {
            Self::Aggressive => [
                (AssetClass::Stock, 0.65),
                (AssetClass::Bond, 0.20),
                (AssetClass::Commodity, 0.10),
                (AssetClass::Cash, 0.05),
            ],
            Self::Balanced => [
                (AssetClass::Stock, 0.45),
                (AssetClass::Bond, 0.35),
                (AssetClass::Commodity, 0.10),
                (AssetClass::Cash, 0.10),
            ],
            Self::Defensive => [
                (AssetClass::Stock, 0.25),
                (AssetClass::Bond, 0.50),
                (AssetClass::Commodity, 0.10),
                (AssetClass::Cash, 0.15),
            ],
            Self::Conservative => [
                (AssetClass::Stock, 0.15),
                (AssetClass::Bond, 0.60),
                (AssetClass::Commodity, 0.05),
                (AssetClass::Cash, 0.20),
            ],
        }
    }

    /// Step-function confidence per stance, by design not derived from the
    /// composite continuously.
    const fn confidence(self) -> f64 {
        match self {
            Self::Aggressive => 0.85,
            Self::Balanced => 0.75,
            Self::Defensive => 0.80,
            Self::Conservative => 0.90,
        }
    }

    const fn tone(self) -> &'static str {
        match self {
            Self::Aggressive => "are both supportive",
            Self::Balanced => "are neutral",
            Self::Defensive => "lean cautious",
            Self::Conservative => "are pessimistic",
        }
    }

    const fn style(self) -> &'static str {
        match self {
            Self::Aggressive => "an aggressive equity-heavy",
            Self::Balanced => "a balanced",
            Self::Defensive => "a defensive",
            Self::Conservative => "a conservative",
        }
    }
}

/// Configuration for [`MacroTimingModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTimingConfig {
    /// Weight of the economic-cycle score in the composite (default: 0.4).
    pub cycle_weight: f64,
    /// Weight of the sentiment score in the composite (default: 0.4).
    pub sentiment_weight: f64,
    /// Weight of the auxiliary-factor score in the composite (default: 0.2).
    pub factors_weight: f64,
}

impl Default for MacroTimingConfig {
    fn default() -> Self {
        Self {
            cycle_weight: 0.4,
            sentiment_weight: 0.4,
            factors_weight: 0.2,
        }
    }
}

/// Heuristic macro timing model producing four-bucket asset allocations.
#[derive(Debug, Clone)]
pub struct MacroTimingModel {
    config: MacroTimingConfig,
}

impl MacroTimingModel {
    /// Model name and version attached to every result for audit purposes.
    pub const MODEL_NAME: &'static str = "MacroTimingModel_v1.0";

    /// Creates a model with the given configuration.
    pub fn new(config: MacroTimingConfig) -> Result<Self, ModelError> {
        let weights = [
            config.cycle_weight,
            config.sentiment_weight,
            config.factors_weight,
        ];
        if weights.iter().any(|&w| !(0.0..=1.0).contains(&w)) {
            return Err(ModelError::InvalidParameter(
                "composite weights must be between 0 and 1".to_string(),
            ));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ModelError::UnnormalizedWeights(total));
        }
        Ok(Self { config })
    }

    /// Current configuration.
    pub const fn config(&self) -> &MacroTimingConfig {
        &self.config
    }

    /// Recommends an asset-class allocation.
    ///
    /// Unknown cycle or sentiment labels silently score as neutral (0.5);
    /// the operation always returns a result.
    pub fn allocate(
        &self,
        economic_cycle: &str,
        market_sentiment: &str,
        additional_factors: &AdditionalFactors,
    ) -> ModelResult<Allocation> {
        let cycle_score = EconomicCycle::score_of(economic_cycle);
        let sentiment_score = MarketSentiment::score_of(market_sentiment);
        let factors_score = Self::factors_score(additional_factors);

        let composite = self.config.cycle_weight * cycle_score
            + self.config.sentiment_weight * sentiment_score
            + self.config.factors_weight * factors_score;

        let stance = Stance::from_composite(composite);
        let mut allocation: Allocation = stance
            .template()
            .iter()
            .map(|&(asset, weight)| (asset.name().to_string(), weight))
            .collect();

        let mut reasoning = format!(
            "Economic cycle ({economic_cycle}) and market sentiment ({market_sentiment}) {}, \
             composite score {composite:.2}; recommending {} allocation.",
            stance.tone(),
            stance.style(),
        );

        if !additional_factors.is_empty() {
            Self::apply_nudges(&mut allocation, additional_factors);
            allocation.renormalize_if_drifted(SUM_TOLERANCE);
            reasoning.push_str(" Allocation fine-tuned for additional macro factors.");
        }

        ModelResult::new(Self::MODEL_NAME, allocation, reasoning, stance.confidence())
    }

    /// Averaged adjustment around 0.5 from the recognized factor keys.
    fn factors_score(factors: &AdditionalFactors) -> f64 {
        let mut delta = 0.0;
        let mut recognized = 0usize;
        for (_, rule) in SCORE_RULES {
            if let Some(d) = rule(factors) {
                delta += d;
                recognized += 1;
            }
        }
        0.5 + delta / recognized.max(1) as f64
    }

    fn apply_nudges(allocation: &mut Allocation, factors: &AdditionalFactors) {
        for rule in NUDGE_RULES {
            if let Some(value) = factors.numeric(rule.key) {
                if (rule.triggers)(value) {
                    allocation.shift(
                        rule.from.name(),
                        rule.to.name(),
                        rule.amount,
                        rule.to_cap,
                        rule.from_floor,
                    );
                }
            }
        }
    }
}

impl Default for MacroTimingModel {
    fn default() -> Self {
        Self {
            config: MacroTimingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn recovery_optimistic_selects_aggressive_template() {
        let model = MacroTimingModel::default();
        let result = model.allocate("recovery", "optimistic", &AdditionalFactors::new());

        // composite = 0.4 * 0.8 + 0.4 * 0.8 + 0.2 * 0.5 = 0.74
        assert_relative_eq!(result.output.weight("STOCK"), 0.65);
        assert_relative_eq!(result.output.weight("BOND"), 0.20);
        assert_relative_eq!(result.output.weight("COMMODITY"), 0.10);
        assert_relative_eq!(result.output.weight("CASH"), 0.05);
        assert_relative_eq!(result.confidence, 0.85);
        assert!(result.reasoning.contains("0.74"));
        assert!(result.reasoning.contains("recovery"));
        assert!(result.reasoning.contains("optimistic"));
        assert_eq!(result.model, MacroTimingModel::MODEL_NAME);
    }

    #[test]
    fn unknown_labels_score_neutral_and_never_fail() {
        let model = MacroTimingModel::default();
        let result = model.allocate("hyperdrive", "confused", &AdditionalFactors::new());

        // All three scores neutral: composite 0.5, balanced stance.
        assert_relative_eq!(result.output.weight("STOCK"), 0.45);
        assert_relative_eq!(result.confidence, 0.75);
    }

    #[rstest]
    #[case("recession", "pessimistic", 0.90)] // composite 0.22, conservative
    #[case("stagflation", "pessimistic", 0.80)] // composite 0.30, defensive
    #[case("overheating", "neutral", 0.75)] // composite 0.54, balanced
    #[case("recovery", "optimistic", 0.85)] // composite 0.74, aggressive
    fn confidence_is_a_step_function_of_the_stance(
        #[case] cycle: &str,
        #[case] sentiment: &str,
        #[case] expected: f64,
    ) {
        let model = MacroTimingModel::default();
        let result = model.allocate(cycle, sentiment, &AdditionalFactors::new());
        assert_relative_eq!(result.confidence, expected);
    }

    #[test]
    fn low_interest_rate_lifts_factor_score() {
        let mut factors = AdditionalFactors::new();
        factors.insert_number("interest_rate", 1.0);
        assert_relative_eq!(MacroTimingModel::factors_score(&factors), 0.7, epsilon = 1e-12);

        let mut factors = AdditionalFactors::new();
        factors.insert_number("interest_rate", 6.0);
        factors.insert_number("geopolitical_risk", 0.9);
        // delta = -0.2 - 0.2 averaged over two recognized keys
        assert_relative_eq!(MacroTimingModel::factors_score(&factors), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn unrecognized_factor_keys_are_ignored() {
        let mut factors = AdditionalFactors::new();
        factors.insert_number("lunar_phase", 0.9);
        assert_relative_eq!(MacroTimingModel::factors_score(&factors), 0.5);
    }

    #[test]
    fn high_rate_nudge_shifts_stock_into_bonds() {
        let model = MacroTimingModel::default();
        let mut factors = AdditionalFactors::new();
        factors.insert_number("interest_rate", 6.5);
        let result = model.allocate("overheating", "neutral", &factors);

        let baseline = model.allocate("overheating", "neutral", &AdditionalFactors::new());
        assert!(result.output.weight("BOND") > baseline.output.weight("BOND"));
        assert!(result.output.weight("STOCK") < baseline.output.weight("STOCK"));
        assert_relative_eq!(result.output.total(), 1.0, epsilon = SUM_TOLERANCE);
        assert!(result.reasoning.contains("fine-tuned"));
    }

    #[test]
    fn geopolitical_risk_nudge_raises_cash() {
        let model = MacroTimingModel::default();
        let mut factors = AdditionalFactors::new();
        factors.insert_number("geopolitical_risk", 0.85);
        let result = model.allocate("recovery", "neutral", &factors);

        assert!(result.output.weight("CASH") > 0.05);
        assert_relative_eq!(result.output.total(), 1.0, epsilon = SUM_TOLERANCE);
    }

    #[test]
    fn allocation_always_sums_to_one() {
        let model = MacroTimingModel::default();
        let mut factors = AdditionalFactors::new();
        factors.insert_number("interest_rate", 9.0);
        factors.insert_number("inflation", 7.5);
        factors.insert_number("geopolitical_risk", 0.95);
        factors.insert_number("exchange_rate", 1.2);

        for cycle in ["recovery", "overheating", "stagflation", "recession"] {
            for sentiment in ["optimistic", "neutral", "pessimistic"] {
                let result = model.allocate(cycle, sentiment, &factors);
                assert_relative_eq!(result.output.total(), 1.0, epsilon = SUM_TOLERANCE);
                assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
            }
        }
    }

    #[test]
    fn determinism_bitwise() {
        let model = MacroTimingModel::default();
        let mut factors = AdditionalFactors::new();
        factors.insert_number("inflation", 5.0);
        let a = model.allocate("stagflation", "neutral", &factors);
        let b = model.allocate("stagflation", "neutral", &factors);
        assert_eq!(a, b);
    }

    #[test]
    fn config_validation_rejects_bad_weights() {
        let config = MacroTimingConfig {
            cycle_weight: 0.6,
            sentiment_weight: 0.6,
            factors_weight: 0.2,
        };
        assert!(matches!(
            MacroTimingModel::new(config),
            Err(ModelError::UnnormalizedWeights(_))
        ));

        let config = MacroTimingConfig {
            cycle_weight: -0.1,
            sentiment_weight: 0.9,
            factors_weight: 0.2,
        };
        assert!(matches!(
            MacroTimingModel::new(config),
            Err(ModelError::InvalidParameter(_))
        ));
    }
}
