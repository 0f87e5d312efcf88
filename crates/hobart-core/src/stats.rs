//! Small-sample descriptive statistics and score normalization.
//!
//! Population (not sample) standard deviation throughout: these helpers
//! describe the full input batch, never estimate from a sample of it.

/// Guard added to min-max denominators so equal scores normalize to 0
/// instead of dividing by zero.
pub const MINMAX_EPSILON: f64 = 1e-8;

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0.0 for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Normalizes raw scores into [0, 1]: z-score with population stdev (mean
/// subtraction only when the stdev is zero), then min-max rescaling with
/// [`MINMAX_EPSILON`] in the denominator. Equal inputs all map to 0.0.
pub fn normalize_scores(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let m = mean(values);
    let std = population_std(values);
    let z_scores: Vec<f64> = if std > 0.0 {
        values.iter().map(|v| (v - m) / std).collect()
    } else {
        values.iter().map(|v| v - m).collect()
    };

    let min = z_scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = z_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    z_scores
        .iter()
        .map(|z| (z - min) / (max - min + MINMAX_EPSILON))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(population_std(&[]), 0.0);
    }

    #[test]
    fn population_std_divides_by_n() {
        // Population stdev of [1, 3] is 1.0 (sample stdev would be sqrt(2)).
        assert_relative_eq!(population_std(&[1.0, 3.0]), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_spreads_into_unit_interval() {
        let normalized = normalize_scores(&[10.0, 20.0, 30.0]);
        assert_relative_eq!(normalized[0], 0.0, epsilon = 1e-6);
        assert!(normalized[1] > 0.49 && normalized[1] < 0.51);
        assert_relative_eq!(normalized[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn normalize_equal_scores_yields_zeros() {
        let normalized = normalize_scores(&[7.0, 7.0, 7.0, 7.0]);
        assert!(normalized.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn normalize_preserves_order() {
        let normalized = normalize_scores(&[5.0, -2.0, 9.0, 0.0]);
        assert!(normalized[2] > normalized[0]);
        assert!(normalized[0] > normalized[3]);
        assert!(normalized[3] > normalized[1]);
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert!(normalize_scores(&[]).is_empty());
    }
}
