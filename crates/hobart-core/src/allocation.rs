//! Category-to-weight allocations and the renormalize-after-adjust helpers.
//!
//! Every model in this workspace produces an [`Allocation`] and adjusts it
//! with bounded nudges. The invariant is always the same: weights live in
//! [0, 1] and sum to 1.0 within a small tolerance after each adjustment
//! step. The adjustment helpers here clamp individual legs; the
//! renormalization helpers restore the sum.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tolerance within which an allocation is considered fully invested.
pub const SUM_TOLERANCE: f64 = 0.01;

/// A mapping from category name (asset class or industry) to a weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation {
    weights: BTreeMap<String, f64>,
}

impl Allocation {
    /// Creates an empty allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no category carries a weight.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Sets the weight for a category, inserting it if absent.
    pub fn set(&mut self, category: impl Into<String>, weight: f64) {
        self.weights.insert(category.into(), weight);
    }

    /// Weight for a category, or 0.0 if absent.
    pub fn weight(&self, category: &str) -> f64 {
        self.weights.get(category).copied().unwrap_or(0.0)
    }

    /// Returns true if the category carries a weight.
    pub fn contains(&self, category: &str) -> bool {
        self.weights.contains_key(category)
    }

    /// Iterates categories and weights in deterministic (key) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, &w)| (k.as_str(), w))
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Rescales all weights so they sum to 1.0. No-op when the current
    /// total is not positive (an all-zero allocation stays all-zero).
    pub fn renormalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for weight in self.weights.values_mut() {
                *weight /= total;
            }
        }
    }

    /// Renormalizes only when the sum has drifted beyond `tolerance`.
    pub fn renormalize_if_drifted(&mut self, tolerance: f64) {
        if (self.total() - 1.0).abs() > tolerance {
            self.renormalize();
        }
    }

    /// Moves `amount` of weight from one category toward another, with each
    /// leg clamped independently: the receiving category is capped at
    /// `to_cap` and the source is floored at `from_floor`. Clamping can
    /// leave the total off 1.0; callers follow with a renormalization.
    pub fn shift(&mut self, from: &str, to: &str, amount: f64, to_cap: f64, from_floor: f64) {
        let gained = (self.weight(to) + amount).min(to_cap);
        let lost = (self.weight(from) - amount).max(from_floor);
        self.set(to, gained);
        self.set(from, lost);
    }

    /// Adds `delta` to an existing category's weight, flooring at 0.0.
    /// Absent categories are left untouched.
    pub fn nudge(&mut self, category: &str, delta: f64) {
        if let Some(weight) = self.weights.get_mut(category) {
            *weight = (*weight + delta).max(0.0);
        }
    }

    /// Multiplies an existing category's weight, capping the result at
    /// `cap`. Absent categories are left untouched.
    pub fn scale_capped(&mut self, category: &str, multiplier: f64, cap: f64) {
        if let Some(weight) = self.weights.get_mut(category) {
            *weight = (*weight * multiplier).min(cap);
        }
    }
}

impl FromIterator<(String, f64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (category, weight) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:.1}%", category, weight * 100.0)?;
            first = false;
        }
        Ok(())
    }
}
