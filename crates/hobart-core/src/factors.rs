//! Open-ended additional-factor maps.
//!
//! Callers pass auxiliary signals as a string-keyed JSON map. Models walk a
//! fixed list of recognized keys and read values through the typed
//! accessors here; unrecognized keys and wrong-shaped values are skipped,
//! never errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A string-keyed map of auxiliary model inputs with JSON-shaped values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalFactors {
    entries: BTreeMap<String, Value>,
}

impl AdditionalFactors {
    /// Creates an empty factor map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no factors are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the key is present, whatever its value shape.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts an arbitrary JSON value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Inserts a numeric factor.
    pub fn insert_number(&mut self, key: impl Into<String>, value: f64) {
        self.insert(key, Value::from(value));
    }

    /// Reads a factor as a number, if it is present and numeric.
    pub fn numeric(&self, key: &str) -> Option<f64> {
        self.entries.get(key).and_then(Value::as_f64)
    }

    /// Reads a factor as a list of strings, skipping non-string elements.
    pub fn string_list(&self, key: &str) -> Option<Vec<&str>> {
        let items = self.entries.get(key)?.as_array()?;
        Some(items.iter().filter_map(Value::as_str).collect())
    }

    /// Reads a factor as a string-to-number map, skipping non-numeric
    /// values.
    pub fn numeric_map(&self, key: &str) -> Option<BTreeMap<&str, f64>> {
        let object = self.entries.get(key)?.as_object()?;
        Some(
            object
                .iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k.as_str(), n)))
                .collect(),
        )
    }
}
