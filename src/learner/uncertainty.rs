//! Per-sample uncertainty metrics over predicted class distributions.
//!
//! Shannon entropy is the primary metric driving the critic: high entropy
//! marks epistemic/aleatoric uncertainty, making those samples candidates
//! for the feedback loop. Margin is kept as a secondary heuristic from the
//! active-learning literature.

use ndarray::{Array1, Array2, Axis};

/// Probabilities are clipped to this floor before any logarithm.
///
/// Keeps `p * log2(p)` defined at p = 0 without perturbing any probability
/// that is already above the floor.
const PROB_FLOOR: f32 = 1e-15;

/// Shannon entropy of each row of an N×K probability matrix.
///
/// `H(Y|X) = -Σ p(y|x) · log2 p(y|x)`
///
/// The result is non-negative; for K classes it peaks at `log2(K)` on the
/// uniform distribution and is ≈ 0 for a one-hot distribution.
///
/// # Examples
///
/// ```
/// use entropic_feedback_core::learner::uncertainty::shannon_entropy;
/// use ndarray::array;
///
/// let entropy = shannon_entropy(&array![[0.5, 0.5], [0.98, 0.02]]);
/// assert!((entropy[0] - 1.0).abs() < 1e-6);
/// assert!((entropy[1] - 0.1414).abs() < 1e-3);
/// ```
pub fn shannon_entropy(proba: &Array2<f32>) -> Array1<f32> {
    proba.map_axis(Axis(1), |row| {
        row.iter()
            .map(|&p| {
                let p = p.clamp(PROB_FLOOR, 1.0);
                -p * p.log2()
            })
            .sum()
    })
}

/// Margin uncertainty of each row: top probability minus the runner-up.
///
/// A smaller margin signals a sample closer to the decision boundary.
/// Degenerate single-class rows fall back to the lone probability.
pub fn margin(proba: &Array2<f32>) -> Array1<f32> {
    proba.map_axis(Axis(1), |row| {
        let mut sorted: Vec<f32> = row.to_vec();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        if sorted.len() >= 2 {
            sorted[0] - sorted[1]
        } else {
            sorted[0]
        }
    })
}
