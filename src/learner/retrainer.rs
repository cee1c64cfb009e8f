//! Full retrain of the base model on canonical data plus feedback.

use ndarray::{concatenate, Array2, Axis};

use crate::learner::error::{LearnerError, LearnerResult};
use crate::learner::model::BaseModel;

/// Merges accumulated feedback into the canonical dataset and retrains.
///
/// Each retrain is from scratch on the union of the regenerated canonical
/// data and the supplied feedback, a deliberate trade of compute for
/// training reproducibility. The updated model is persisted before the call
/// returns; nothing is mutated if validation fails.
#[derive(Debug, Default)]
pub struct Retrainer;

impl Retrainer {
    pub fn new() -> Self {
        Self
    }

    /// Retrain `model` on canonical data extended with feedback samples.
    pub fn retrain(
        &self,
        model: &mut BaseModel,
        feedback_features: &Array2<f32>,
        feedback_labels: &[usize],
    ) -> LearnerResult<()> {
        let canonical = model.generate_data();

        if feedback_features.ncols() != canonical.n_features() {
            return Err(LearnerError::ShapeMismatch {
                expected: canonical.n_features(),
                got: feedback_features.ncols(),
                context: "retrain feedback".to_string(),
            });
        }
        if feedback_labels.len() != feedback_features.nrows() {
            return Err(LearnerError::ShapeMismatch {
                expected: feedback_features.nrows(),
                got: feedback_labels.len(),
                context: "retrain feedback labels".to_string(),
            });
        }

        let combined_features = concatenate(
            Axis(0),
            &[canonical.features.view(), feedback_features.view()],
        )
        .map_err(|_| LearnerError::ShapeMismatch {
            expected: canonical.n_features(),
            got: feedback_features.ncols(),
            context: "retrain concatenation".to_string(),
        })?;

        let mut combined_labels = canonical.labels;
        combined_labels.extend_from_slice(feedback_labels);

        model.train(&combined_features, &combined_labels)?;
        model.save()?;
        Ok(())
    }
}
