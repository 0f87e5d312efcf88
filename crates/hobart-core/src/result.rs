//! Model result envelope.

use serde::{Deserialize, Serialize};

/// Output of one model invocation: the payload plus a human-readable
/// reasoning string and a heuristic confidence.
///
/// `confidence` lives in [0, 1] and expresses input-driven certainty, not a
/// statistical probability. `model` is a static model-name/version string
/// attached for audit purposes; this subsystem has no other identity or
/// versioning concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult<T> {
    /// Model name and version, e.g. `"MacroTimingModel_v1.0"`.
    pub model: String,
    /// The allocation or ranking produced by the model.
    pub output: T,
    /// Templated explanation of how the output was derived.
    pub reasoning: String,
    /// Heuristic certainty in [0, 1]; 0.0 for empty-input results.
    pub confidence: f64,
}

impl<T> ModelResult<T> {
    /// Creates a new result envelope.
    pub fn new(
        model: impl Into<String>,
        output: T,
        reasoning: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            model: model.into(),
            output,
            reasoning: reasoning.into(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let result = ModelResult::new("DemoModel_v1.0", vec![1.0, 2.0], "demo", 0.5);
        let json = serde_json::to_string(&result).unwrap();
        let back: ModelResult<Vec<f64>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
