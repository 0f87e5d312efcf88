//! Coarse market-state labels and their fixed heuristic scores.
//!
//! Each enumeration maps a small set of string labels to a scalar score via
//! a constant table. Unknown labels resolve to [`NEUTRAL_SCORE`] through the
//! `score_of` helpers, which are the single place default handling lives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score substituted for any label that is not in an enumeration's table.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Phase of the economic cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EconomicCycle {
    /// Expansion out of a trough; favors equities.
    Recovery,
    /// Late-cycle expansion with inflation pressure.
    Overheating,
    /// Stagnant growth with persistent inflation.
    Stagflation,
    /// Contraction; defensive positioning.
    Recession,
}

impl EconomicCycle {
    /// Parse a cycle label. Unknown labels return `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "recovery" => Some(Self::Recovery),
            "overheating" => Some(Self::Overheating),
            "stagflation" => Some(Self::Stagflation),
            "recession" => Some(Self::Recession),
            _ => None,
        }
    }

    /// The canonical label for this phase.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Overheating => "overheating",
            Self::Stagflation => "stagflation",
            Self::Recession => "recession",
        }
    }

    /// Fixed heuristic score for this phase.
    pub const fn score(&self) -> f64 {
        match self {
            Self::Recovery => 0.8,
            Self::Overheating => 0.6,
            Self::Stagflation => 0.3,
            Self::Recession => 0.1,
        }
    }

    /// Score for an arbitrary label, falling back to [`NEUTRAL_SCORE`].
    pub fn score_of(label: &str) -> f64 {
        Self::from_label(label).map_or(NEUTRAL_SCORE, |c| c.score())
    }
}

impl fmt::Display for EconomicCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Aggregate market sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSentiment {
    /// Broadly positive sentiment.
    Optimistic,
    /// Neither positive nor negative.
    Neutral,
    /// Broadly negative sentiment.
    Pessimistic,
}

impl MarketSentiment {
    /// Parse a sentiment label. Unknown labels return `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "optimistic" => Some(Self::Optimistic),
            "neutral" => Some(Self::Neutral),
            "pessimistic" => Some(Self::Pessimistic),
            _ => None,
        }
    }

    /// The canonical label for this sentiment.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Optimistic => "optimistic",
            Self::Neutral => "neutral",
            Self::Pessimistic => "pessimistic",
        }
    }

    /// Fixed heuristic score for this sentiment.
    pub const fn score(&self) -> f64 {
        match self {
            Self::Optimistic => 0.8,
            Self::Neutral => 0.5,
            Self::Pessimistic => 0.2,
        }
    }

    /// Score for an arbitrary label, falling back to [`NEUTRAL_SCORE`].
    pub fn score_of(label: &str) -> f64 {
        Self::from_label(label).map_or(NEUTRAL_SCORE, |s| s.score())
    }
}

impl fmt::Display for MarketSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coarse market regime used to bias factor weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketRegime {
    /// Rising market; momentum and growth lead.
    Bull,
    /// Falling market; value and quality lead.
    Bear,
    /// Range-bound market; no tilt.
    Sideways,
}

impl MarketRegime {
    /// Parse a regime label. Unknown labels return `None` and callers
    /// treat them like [`MarketRegime::Sideways`] (no weight tilt).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "bull" => Some(Self::Bull),
            "bear" => Some(Self::Bear),
            "sideways" => Some(Self::Sideways),
            _ => None,
        }
    }

    /// The canonical label for this regime.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bull => "bull",
            Self::Bear => "bear",
            Self::Sideways => "sideways",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
