//! Multi-factor model: composite scoring, ranking, and factor discovery.
//!
//! Each security's composite score is the weighted sum of the factor values
//! it actually carries; factors absent from a security are skipped, not
//! zeroed. Factor weights can be tilted by a market regime before scoring,
//! and an optional discovery pass derives auxiliary factors from aggregate
//! statistics of the input batch.

use crate::ModelError;
use hobart_core::{stats, MarketRegime, ModelResult, RankedSecurity, SecurityFactors};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Factor set used when the caller supplies no weights; each gets an equal
/// share.
pub const DEFAULT_FACTORS: [&str; 4] = ["value", "growth", "quality", "momentum"];

/// Industry label used for securities without one.
const UNLABELED_INDUSTRY: &str = "other";

// Regime tilts: multiplier applied to the existing weight, falling back to
// the listed base when the factor key is absent from the weight map.
const BULL_MOMENTUM: (f64, f64) = (0.2, 1.3);
const BULL_GROWTH: (f64, f64) = (0.3, 1.2);
const BEAR_VALUE: (f64, f64) = (0.3, 1.3);
const BEAR_QUALITY: (f64, f64) = (0.2, 1.2);

// Discovery caps and scales.
const INDUSTRY_FACTOR_CAP: f64 = 0.15;
const INDUSTRY_FACTOR_SCALE: f64 = 0.1;
const SIZE_FACTOR_CAP: f64 = 0.12;
const CAP_SCALE: f64 = 1e8;
const VOLATILITY_FACTOR_CAP: f64 = 0.10;
const VOLATILITY_BASELINE: f64 = 0.3;

/// Configuration for [`MultiFactorModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiFactorConfig {
    /// Minimum number of input securities before factor discovery runs
    /// (default: 10).
    pub min_discovery_sample: usize,
    /// Minimum members an industry group needs to emit an industry
    /// momentum factor (default: 4).
    pub min_industry_group: usize,
}

impl Default for MultiFactorConfig {
    fn default() -> Self {
        Self {
            min_discovery_sample: 10,
            min_industry_group: 4,
        }
    }
}

/// Ranking output of [`MultiFactorModel::rank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRanking {
    /// Securities ordered by descending composite score, ranks 1..N.
    pub ranking: Vec<RankedSecurity>,
    /// The regime-adjusted, renormalized weight map used for scoring.
    pub adjusted_weights: BTreeMap<String, f64>,
    /// Auxiliary factors derived from the input batch, when discovery ran.
    /// Informational only: never folded back into this call's scores.
    pub discovered_factors: Option<BTreeMap<String, f64>>,
}

/// Heuristic multi-factor scoring and ranking model.
#[derive(Debug, Clone)]
pub struct MultiFactorModel {
    config: MultiFactorConfig,
}

impl MultiFactorModel {
    /// Model name and version attached to every result for audit purposes.
    pub const MODEL_NAME: &'static str = "MultiFactorModel_v1.0";

    /// Creates a model with the given configuration.
    pub fn new(config: MultiFactorConfig) -> Result<Self, ModelError> {
        if config.min_discovery_sample == 0 || config.min_industry_group == 0 {
            return Err(ModelError::InvalidParameter(
                "discovery thresholds must be at least 1".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Current configuration.
    pub const fn config(&self) -> &MultiFactorConfig {
        &self.config
    }

    /// Scores and ranks `securities` by weighted factor composite.
    ///
    /// `factor_weights` defaults to an equal split over
    /// [`DEFAULT_FACTORS`]. A recognized `market_regime` label tilts the
    /// weights before scoring; unknown labels leave them unchanged. With
    /// `auto_discover` set and enough securities, auxiliary factors are
    /// derived from the batch and returned as a side output.
    ///
    /// Empty `securities` returns an empty ranking, the unadjusted weight
    /// map, no discovered factors, and confidence 0.0.
    pub fn rank(
        &self,
        securities: &[SecurityFactors],
        factor_weights: Option<&BTreeMap<String, f64>>,
        market_regime: Option<&str>,
        auto_discover: bool,
    ) -> ModelResult<FactorRanking> {
        let base_weights = factor_weights.cloned().unwrap_or_else(default_weights);

        if securities.is_empty() {
            return ModelResult::new(
                Self::MODEL_NAME,
                FactorRanking {
                    ranking: Vec::new(),
                    adjusted_weights: base_weights,
                    discovered_factors: None,
                },
                "No security data provided.",
                0.0,
            );
        }

        let adjusted_weights = adjust_weights_by_regime(&base_weights, market_regime);

        let mut ranking: Vec<RankedSecurity> = securities
            .iter()
            .map(|security| score_security(security, &adjusted_weights))
            .collect();
        // Stable sort: equal composites keep input order.
        ranking.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
        for (i, entry) in ranking.iter_mut().enumerate() {
            entry.rank = i + 1;
        }

        let discovered_factors = if auto_discover {
            self.discover_factors(securities)
        } else {
            None
        };

        let confidence = if ranking.len() > 1 {
            let scores: Vec<f64> = ranking.iter().map(|r| r.composite_score).collect();
            (0.7 + stats::population_std(&scores) * 2.0).min(0.95)
        } else {
            0.6
        };

        let mut reasoning = market_regime.map_or_else(
            || "Scored with the baseline multi-factor weights.".to_string(),
            |label| format!("Scored with factor weights tilted for the {label} market regime."),
        );
        if let Some(discovered) = &discovered_factors {
            if !discovered.is_empty() {
                reasoning.push_str(&format!(
                    " Discovered {} auxiliary factors from the input batch.",
                    discovered.len()
                ));
            }
        }

        ModelResult::new(
            Self::MODEL_NAME,
            FactorRanking {
                ranking,
                adjusted_weights,
                discovered_factors,
            },
            reasoning,
            confidence,
        )
    }

    /// Derives auxiliary factors from aggregate statistics of the batch.
    /// Returns `None` below the minimum sample size.
    fn discover_factors(&self, securities: &[SecurityFactors]) -> Option<BTreeMap<String, f64>> {
        if securities.len() < self.config.min_discovery_sample {
            return None;
        }

        let mut discovered = BTreeMap::new();

        // Industry momentum: mean growth factor per sufficiently large
        // industry group. A member without a growth factor counts as 0.
        let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for security in securities {
            let industry = security.industry.as_deref().unwrap_or(UNLABELED_INDUSTRY);
            groups
                .entry(industry)
                .or_default()
                .push(security.factor_values.get("growth").copied().unwrap_or(0.0));
        }
        for (industry, growth_values) in &groups {
            if growth_values.len() >= self.config.min_industry_group {
                let weight = (stats::mean(growth_values) * INDUSTRY_FACTOR_SCALE)
                    .min(INDUSTRY_FACTOR_CAP);
                discovered.insert(format!("industry_momentum_{industry}"), weight);
            }
        }

        // Size: smaller mean market cap pushes the weight toward its cap.
        let market_caps: Vec<f64> = securities
            .iter()
            .filter_map(|s| s.market_cap)
            .filter(|&cap| cap > 0.0)
            .collect();
        if !market_caps.is_empty() {
            let weight = (CAP_SCALE / (stats::mean(&market_caps) + CAP_SCALE)).min(SIZE_FACTOR_CAP);
            discovered.insert("size_factor".to_string(), weight);
        }

        // Volatility: calmer batches earn a larger low-volatility weight.
        let volatilities: Vec<f64> = securities
            .iter()
            .filter_map(|s| s.volatility)
            .filter(|&vol| vol > 0.0)
            .collect();
        if !volatilities.is_empty() {
            let weight = (VOLATILITY_BASELINE - stats::mean(&volatilities))
                .max(0.0)
                .min(VOLATILITY_FACTOR_CAP);
            discovered.insert("volatility_factor".to_string(), weight);
        }

        Some(discovered)
    }
}

impl Default for MultiFactorModel {
    fn default() -> Self {
        Self {
            config: MultiFactorConfig::default(),
        }
    }
}

/// Equal weights over [`DEFAULT_FACTORS`].
fn default_weights() -> BTreeMap<String, f64> {
    let share = 1.0 / DEFAULT_FACTORS.len() as f64;
    DEFAULT_FACTORS
        .iter()
        .map(|&factor| (factor.to_string(), share))
        .collect()
}

/// Tilts the weight map for the regime, then renormalizes to sum 1.0.
/// Unknown or absent regime labels leave the weights untilted.
fn adjust_weights_by_regime(
    weights: &BTreeMap<String, f64>,
    market_regime: Option<&str>,
) -> BTreeMap<String, f64> {
    let mut adjusted = weights.clone();
    match market_regime.and_then(MarketRegime::from_label) {
        Some(MarketRegime::Bull) => {
            boost(&mut adjusted, "momentum", BULL_MOMENTUM);
            boost(&mut adjusted, "growth", BULL_GROWTH);
        }
        Some(MarketRegime::Bear) => {
            boost(&mut adjusted, "value", BEAR_VALUE);
            boost(&mut adjusted, "quality", BEAR_QUALITY);
        }
        _ => {}
    }

    let total: f64 = adjusted.values().sum();
    if total > 0.0 {
        for weight in adjusted.values_mut() {
            *weight /= total;
        }
    }
    adjusted
}

fn boost(weights: &mut BTreeMap<String, f64>, factor: &str, (base, multiplier): (f64, f64)) {
    let current = weights.get(factor).copied().unwrap_or(base);
    weights.insert(factor.to_string(), current * multiplier);
}

/// Composite score over the factors present in both maps; rank is filled
/// in after sorting.
fn score_security(
    security: &SecurityFactors,
    weights: &BTreeMap<String, f64>,
) -> RankedSecurity {
    let mut factor_contribution = BTreeMap::new();
    let mut composite_score = 0.0;
    for (factor, weight) in weights {
        if let Some(value) = security.factor_values.get(factor) {
            let contribution = value * weight;
            factor_contribution.insert(factor.clone(), contribution);
            composite_score += contribution;
        }
    }
    RankedSecurity {
        symbol: security.symbol.clone(),
        name: security.name.clone(),
        composite_score,
        factor_contribution,
        rank: 0,
    }
}
