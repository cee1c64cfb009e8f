//! Entropy-based quality gate over predicted class distributions.

use ndarray::Array2;

use crate::learner::error::{LearnerError, LearnerResult};
use crate::learner::uncertainty::shannon_entropy;

/// Flags each prediction as high or low quality by its Shannon entropy.
///
/// Configured by a single strictness scalar in [0, 1]. The derived entropy
/// tolerance is `log2(n_classes) * (1 - critic_threshold)`: at strictness 1.0
/// no entropy is tolerated, at 0.0 everything up to the uniform distribution
/// passes. The boundary is inclusive: entropy exactly equal to the tolerance
/// still counts as high quality.
#[derive(Debug, Clone)]
pub struct Critic {
    entropy_threshold: f32,
}

impl Critic {
    /// Build a critic for `n_classes`-way predictions.
    pub fn new(critic_threshold: f32, n_classes: usize) -> LearnerResult<Self> {
        if !critic_threshold.is_finite() || !(0.0..=1.0).contains(&critic_threshold) {
            return Err(LearnerError::InvalidParameter {
                parameter: "critic_threshold".to_string(),
                value: critic_threshold.to_string(),
                constraint: "0.0 <= critic_threshold <= 1.0".to_string(),
            });
        }
        if n_classes < 2 {
            return Err(LearnerError::InvalidParameter {
                parameter: "n_classes".to_string(),
                value: n_classes.to_string(),
                constraint: "n_classes >= 2".to_string(),
            });
        }

        let max_entropy = (n_classes as f32).log2();
        Ok(Self {
            entropy_threshold: max_entropy * (1.0 - critic_threshold),
        })
    }

    /// The derived entropy tolerance.
    pub fn entropy_threshold(&self) -> f32 {
        self.entropy_threshold
    }

    /// Evaluate prediction quality per sample.
    ///
    /// Returns one flag per row of `proba`: true iff the row's entropy is
    /// at or below the tolerance. Stateless; no side effects.
    pub fn evaluate(&self, proba: &Array2<f32>) -> Vec<bool> {
        shannon_entropy(proba)
            .iter()
            .map(|&h| h <= self.entropy_threshold)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn threshold_derivation_for_binary() {
        // max entropy is 1.0 for two classes
        let critic = Critic::new(0.85, 2).unwrap();
        assert!((critic.entropy_threshold() - 0.15).abs() < 1e-6);

        let strict = Critic::new(1.0, 2).unwrap();
        assert!(strict.entropy_threshold().abs() < 1e-6);
    }

    #[test]
    fn threshold_scales_with_class_count() {
        let critic = Critic::new(0.5, 4).unwrap();
        assert!((critic.entropy_threshold() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn separates_confident_from_uncertain() {
        // entropy([0.98, 0.02]) ≈ 0.1414 passes a 0.15 tolerance,
        // entropy([0.5, 0.5]) = 1.0 does not.
        let critic = Critic::new(0.85, 2).unwrap();
        let quality = critic.evaluate(&array![[0.98, 0.02], [0.5, 0.5]]);
        assert_eq!(quality, vec![true, false]);
    }

    #[test]
    fn boundary_is_inclusive() {
        // strictness 0.0 puts the tolerance at max entropy exactly; the
        // uniform distribution reaches it and must still pass.
        let critic = Critic::new(0.0, 2).unwrap();
        assert_eq!(critic.entropy_threshold(), 1.0);
        let quality = critic.evaluate(&array![[0.5, 0.5]]);
        assert_eq!(quality, vec![true]);
    }

    #[test]
    fn stricter_threshold_passes_fewer_samples() {
        let proba = array![[0.98, 0.02], [0.9, 0.1], [0.7, 0.3], [0.5, 0.5]];
        let lenient = Critic::new(0.2, 2).unwrap();
        let strict = Critic::new(0.9, 2).unwrap();

        let lenient_passes = lenient.evaluate(&proba).iter().filter(|&&q| q).count();
        let strict_passes = strict.evaluate(&proba).iter().filter(|&&q| q).count();
        assert!(strict_passes < lenient_passes);
    }

    #[test]
    fn degenerate_rows_do_not_poison_evaluation() {
        let critic = Critic::new(0.5, 2).unwrap();
        let quality = critic.evaluate(&array![[0.0, 0.0], [1.0, 0.0]]);
        assert_eq!(quality.len(), 2);
        assert!(quality[1]);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        assert!(matches!(
            Critic::new(-0.1, 2),
            Err(LearnerError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Critic::new(1.1, 2),
            Err(LearnerError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Critic::new(0.5, 1),
            Err(LearnerError::InvalidParameter { .. })
        ));
    }
}
