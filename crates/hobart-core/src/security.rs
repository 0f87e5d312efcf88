//! Per-security factor records and ranking entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single industry's heuristic score, as supplied by the caller.
///
/// Sector inputs are ordered slices of these so that tie-breaking by input
/// order is well-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryScore {
    /// Industry name.
    pub industry: String,
    /// Raw heuristic score; any real value, normalized by the model.
    pub score: f64,
}

impl IndustryScore {
    /// Creates a new industry score.
    pub fn new(industry: impl Into<String>, score: f64) -> Self {
        Self {
            industry: industry.into(),
            score,
        }
    }
}

/// Factor snapshot for one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityFactors {
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Factor name to factor value. Factors missing here are skipped when
    /// scoring, not treated as zero.
    #[serde(default)]
    pub factor_values: BTreeMap<String, f64>,
    /// Industry label, if known.
    #[serde(default)]
    pub industry: Option<String>,
    /// Market capitalization, if known.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Annualized volatility, if known.
    #[serde(default)]
    pub volatility: Option<f64>,
}

impl SecurityFactors {
    /// Creates a record with no factor values.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            factor_values: BTreeMap::new(),
            industry: None,
            market_cap: None,
            volatility: None,
        }
    }

    /// Adds a factor value.
    #[must_use]
    pub fn with_factor(mut self, factor: impl Into<String>, value: f64) -> Self {
        self.factor_values.insert(factor.into(), value);
        self
    }

    /// Sets the industry label.
    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Sets the market capitalization.
    #[must_use]
    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    /// Sets the volatility.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }
}

/// One entry of a factor-model ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSecurity {
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Weighted sum of factor contributions; unbounded.
    pub composite_score: f64,
    /// Per-factor contribution to the composite score.
    pub factor_contribution: BTreeMap<String, f64>,
    /// 1-based rank; ties keep input order.
    pub rank: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_helpers_populate_fields() {
        let security = SecurityFactors::new("ACME", "Acme Corp")
            .with_factor("value", 0.8)
            .with_factor("growth", 0.3)
            .with_industry("Industrials")
            .with_market_cap(2.5e9)
            .with_volatility(0.22);

        assert_eq!(security.factor_values.len(), 2);
        assert_eq!(security.industry.as_deref(), Some("Industrials"));
        assert_eq!(security.market_cap, Some(2.5e9));
        assert_eq!(security.volatility, Some(0.22));
    }

    #[test]
    fn deserializes_with_optional_fields_absent() {
        let security: SecurityFactors = serde_json::from_str(
            r#"{"symbol": "ACME", "name": "Acme Corp", "factor_values": {"value": 1.0}}"#,
        )
        .unwrap();
        assert_eq!(security.industry, None);
        assert_eq!(security.market_cap, None);
        assert_eq!(security.factor_values.get("value"), Some(&1.0));
    }
}
