//! Classification metrics for the binary task.

use serde::Serialize;

/// Accuracy, precision, recall, and F1 for a binary prediction run.
///
/// Precision/recall/F1 treat label 1 as the positive class; an empty
/// denominator yields 0.0 rather than NaN.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassificationMetrics {
    pub accuracy: f32,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
}

impl ClassificationMetrics {
    pub fn compute(y_true: &[usize], y_pred: &[usize]) -> Self {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "label and prediction counts differ"
        );

        let mut tp = 0usize;
        let mut fp = 0usize;
        let mut fn_ = 0usize;
        let mut correct = 0usize;

        for (&truth, &pred) in y_true.iter().zip(y_pred) {
            if truth == pred {
                correct += 1;
            }
            match (truth, pred) {
                (1, 1) => tp += 1,
                (0, 1) => fp += 1,
                (1, 0) => fn_ += 1,
                _ => {}
            }
        }

        let accuracy = if y_true.is_empty() {
            0.0
        } else {
            correct as f32 / y_true.len() as f32
        };
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_example() {
        let metrics = ClassificationMetrics::compute(&[0, 1, 1, 0], &[0, 1, 0, 0]);
        assert!((metrics.accuracy - 0.75).abs() < 1e-6);
        assert!((metrics.precision - 1.0).abs() < 1e-6);
        assert!((metrics.recall - 0.5).abs() < 1e-6);
        assert!((metrics.f1 - 2.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn perfect_predictions() {
        let metrics = ClassificationMetrics::compute(&[0, 1, 0, 1], &[0, 1, 0, 1]);
        assert_eq!(metrics.accuracy, 1.0);
        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.recall, 1.0);
        assert_eq!(metrics.f1, 1.0);
    }

    #[test]
    fn degenerate_predictions_yield_zero_not_nan() {
        // Never predicting the positive class: precision undefined → 0.0.
        let metrics = ClassificationMetrics::compute(&[1, 1, 0], &[0, 0, 0]);
        assert_eq!(metrics.precision, 0.0);
        assert_eq!(metrics.recall, 0.0);
        assert_eq!(metrics.f1, 0.0);
        assert!(metrics.accuracy > 0.0);
    }

    #[test]
    #[should_panic(expected = "label and prediction counts differ")]
    fn mismatched_lengths_panic() {
        ClassificationMetrics::compute(&[0, 1], &[0]);
    }
}
