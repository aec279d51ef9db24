use ndarray::Array1;

use crate::IndexWeights;

/// Reduce an error trace and a control trace to one scalar (lower is better).
///
/// For each sample: `w.error * |e| + w.effort * u^2`, plus
/// `w.negative_error_penalty * |e|` when `e < 0`. Overshoot is therefore
/// scored much harder than undershoot.
///
/// Only the common prefix of `error` and `control` is scored.
pub fn performance_index(error: &Array1<f64>, control: &Array1<f64>, w: &IndexWeights) -> f64 {
    let mut total = 0.0;
    for (&e, &u) in error.iter().zip(control.iter()) {
        let ji = w.error * e.abs() + w.effort * u * u;
        total += ji;
        if e < 0.0 {
            total += w.negative_error_penalty * e.abs();
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_negative_error_penalty_only_on_negative_sample() {
        let j = performance_index(&array![1.0, -1.0], &array![0.0, 0.0], &IndexWeights::default());
        assert!((j - 11.998).abs() < 1e-12, "got {}", j);
    }

    #[test]
    fn test_control_effort_term() {
        let j = performance_index(&array![0.0, 0.0], &array![10.0, -10.0], &IndexWeights::default());
        // 0.001 * 100 per sample
        assert!((j - 0.2).abs() < 1e-12, "got {}", j);
    }

    #[test]
    fn test_asymmetric_scoring() {
        let w = IndexWeights::default();
        let under = performance_index(&array![0.5], &array![0.0], &w);
        let over = performance_index(&array![-0.5], &array![0.0], &w);
        assert!(over > under);
        assert!((over - under - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_traces_score_zero() {
        let empty = Array1::<f64>::zeros(0);
        assert_eq!(performance_index(&empty, &empty, &IndexWeights::default()), 0.0);
    }
}
