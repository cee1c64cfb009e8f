//! Base predictive model: trainable classifier plus persisted state.
//!
//! Owns the fitted [`LogisticRegression`] and the artifact path. Training
//! fully replaces the internal state; `save` overwrites the persisted blob
//! unconditionally (callers needing history must version externally), and
//! `load` is a deliberate no-op when nothing has been persisted yet so the
//! orchestrator can probe for a model without treating absence as an error.

use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::checkpoint::Checkpointable;
use crate::config::LoopConfig;
use crate::data::synthetic::{self, Dataset};
use crate::learner::classifier::LogisticRegression;
use crate::learner::error::{LearnerError, LearnerResult};

pub struct BaseModel {
    config: LoopConfig,
    classifier: Option<LogisticRegression>,
    model_path: PathBuf,
}

impl BaseModel {
    /// Build an untrained model from configuration.
    pub fn new(config: &LoopConfig) -> Self {
        Self {
            config: config.clone(),
            classifier: None,
            model_path: config.model.path.clone(),
        }
    }

    /// Regenerate the canonical dataset for this configuration.
    ///
    /// Deterministic: every call yields the identical dataset, which is what
    /// makes the evaluation partition stable and retrains reproducible.
    pub fn generate_data(&self) -> Dataset {
        synthetic::generate(&self.config.data)
    }

    /// Fit a fresh classifier, replacing any previous state.
    pub fn train(&mut self, features: &Array2<f32>, labels: &[usize]) -> LearnerResult<()> {
        if features.ncols() != self.config.data.n_features {
            return Err(LearnerError::ShapeMismatch {
                expected: self.config.data.n_features,
                got: features.ncols(),
                context: "train features".to_string(),
            });
        }

        let classifier = LogisticRegression::fit(
            features,
            labels,
            self.config.data.n_classes,
            &self.config.training,
        )?;
        self.classifier = Some(classifier);
        Ok(())
    }

    /// Predicted class label per sample.
    pub fn predict(&self, features: &Array2<f32>) -> LearnerResult<Vec<usize>> {
        self.fitted("predict")?.predict(features)
    }

    /// Predicted class distribution per sample.
    pub fn predict_proba(&self, features: &Array2<f32>) -> LearnerResult<Array2<f32>> {
        self.fitted("predict_proba")?.predict_proba(features)
    }

    /// Persist the fitted state, overwriting any prior artifact.
    pub fn save(&self) -> LearnerResult<()> {
        self.fitted("save")?.save_checkpoint(&self.model_path)?;
        Ok(())
    }

    /// Replace in-memory state with the persisted artifact.
    ///
    /// No-op when no artifact exists. A present-but-unreadable artifact is an
    /// error, never silently degraded to an untrained model.
    pub fn load(&mut self) -> LearnerResult<()> {
        if !self.model_path.exists() {
            return Ok(());
        }
        self.classifier = Some(LogisticRegression::load_checkpoint(&self.model_path)?);
        Ok(())
    }

    /// Whether a persisted artifact exists at the configured path.
    pub fn is_persisted(&self) -> bool {
        self.model_path.exists()
    }

    /// Whether the in-memory model has been fitted or loaded.
    pub fn is_trained(&self) -> bool {
        self.classifier.is_some()
    }

    /// Path of the persisted artifact.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn fitted(&self, operation: &str) -> LearnerResult<&LogisticRegression> {
        self.classifier
            .as_ref()
            .ok_or_else(|| LearnerError::Untrained {
                operation: operation.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoopConfig;

    fn config_in(dir: &Path) -> LoopConfig {
        let mut config = LoopConfig::default();
        config.data.n_samples = 200;
        config.data.n_features = 4;
        config.training.max_iter = 100;
        config.model.path = dir.join("model.bin");
        config
    }

    #[test]
    fn generate_data_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let model = BaseModel::new(&config_in(dir.path()));

        let a = model.generate_data();
        let b = model.generate_data();
        assert_eq!(a.features, b.features);
        assert_eq!(a.labels, b.labels);
    }

    #[test]
    fn predict_before_train_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let model = BaseModel::new(&config_in(dir.path()));

        let data = model.generate_data();
        assert!(matches!(
            model.predict(&data.features),
            Err(LearnerError::Untrained { .. })
        ));
        assert!(matches!(
            model.predict_proba(&data.features),
            Err(LearnerError::Untrained { .. })
        ));
        assert!(matches!(
            model.save(),
            Err(LearnerError::Untrained { .. })
        ));
    }

    #[test]
    fn load_without_artifact_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = BaseModel::new(&config_in(dir.path()));

        assert!(!model.is_persisted());
        model.load().unwrap();
        assert!(!model.is_trained());
    }

    #[test]
    fn save_then_load_round_trips_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let mut model = BaseModel::new(&config);
        let data = model.generate_data();
        model.train(&data.features, &data.labels).unwrap();
        model.save().unwrap();

        let before_labels = model.predict(&data.features).unwrap();
        let before_proba = model.predict_proba(&data.features).unwrap();

        let mut restored = BaseModel::new(&config);
        restored.load().unwrap();
        assert!(restored.is_trained());

        assert_eq!(restored.predict(&data.features).unwrap(), before_labels);
        assert_eq!(restored.predict_proba(&data.features).unwrap(), before_proba);
    }

    #[test]
    fn train_rejects_wrong_feature_width() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = BaseModel::new(&config_in(dir.path()));

        let features = Array2::<f32>::zeros((10, 3));
        let labels = vec![0; 10];
        assert!(matches!(
            model.train(&features, &labels),
            Err(LearnerError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn corrupt_artifact_is_not_silently_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.model.path, b"not a checkpoint").unwrap();

        let mut model = BaseModel::new(&config);
        assert!(matches!(
            model.load(),
            Err(LearnerError::Checkpoint(_))
        ));
    }
}
