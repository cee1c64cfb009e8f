//! Linear classifier fitted by full-batch gradient descent.
//!
//! Multinomial logistic regression: a single weight matrix and bias vector,
//! softmax over class logits, cross-entropy gradient updates. Deliberately
//! the simplest trainable model that produces calibrated-enough probability
//! distributions for the entropy critic to grade.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::checkpoint::{read_snapshot, write_snapshot, CheckpointError, Checkpointable};
use crate::config::TrainingConfig;
use crate::learner::error::{LearnerError, LearnerResult};

/// Schema version of the persisted snapshot.
const MODEL_SCHEMA_VERSION: u32 = 1;

/// Fitted parameters, flattened for the checkpoint codec.
#[derive(Debug, Serialize, Deserialize)]
struct ModelSnapshot {
    version: u32,
    n_classes: usize,
    n_features: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

/// Multinomial logistic regression over dense feature rows.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// [n_classes, n_features]
    weights: Array2<f32>,
    /// [n_classes]
    bias: Array1<f32>,
}

impl LogisticRegression {
    /// Fit a fresh classifier on `features` (N×D) and `labels` (N).
    ///
    /// Runs `config.max_iter` full-batch epochs at a fixed learning rate.
    /// Weight initialization is seeded from `config.random_state`, so the
    /// fit is deterministic given identical inputs and configuration.
    pub fn fit(
        features: &Array2<f32>,
        labels: &[usize],
        n_classes: usize,
        config: &TrainingConfig,
    ) -> LearnerResult<Self> {
        if labels.len() != features.nrows() {
            return Err(LearnerError::ShapeMismatch {
                expected: features.nrows(),
                got: labels.len(),
                context: "fit labels".to_string(),
            });
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(LearnerError::InvalidParameter {
                parameter: "labels".to_string(),
                value: bad.to_string(),
                constraint: format!("label < {}", n_classes),
            });
        }

        let n_features = features.ncols();
        let n = features.nrows() as f32;

        let mut rng = StdRng::seed_from_u64(config.random_state);
        let scale = (2.0 / n_features as f32).sqrt();
        let mut weights = Array2::from_shape_fn((n_classes, n_features), |_| {
            (rng.gen::<f32>() - 0.5) * 2.0 * scale
        });
        let mut bias = Array1::zeros(n_classes);

        for _ in 0..config.max_iter {
            let logits = features.dot(&weights.t()) + &bias;
            let mut dz = softmax_rows(&logits);

            // Softmax + cross-entropy gradient: proba minus one-hot target.
            for (i, &label) in labels.iter().enumerate() {
                dz[[i, label]] -= 1.0;
            }

            let grad_w = dz.t().dot(features) / n;
            let grad_b = dz.sum_axis(Axis(0)) / n;

            weights = &weights - &(&grad_w * config.learning_rate);
            bias = &bias - &(&grad_b * config.learning_rate);
        }

        Ok(Self { weights, bias })
    }

    /// Number of feature columns the classifier was fitted on.
    pub fn n_features(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of classes the classifier distinguishes.
    pub fn n_classes(&self) -> usize {
        self.weights.nrows()
    }

    /// Per-sample class distributions for `features` (N×D).
    pub fn predict_proba(&self, features: &Array2<f32>) -> LearnerResult<Array2<f32>> {
        if features.ncols() != self.n_features() {
            return Err(LearnerError::ShapeMismatch {
                expected: self.n_features(),
                got: features.ncols(),
                context: "predict_proba".to_string(),
            });
        }

        let logits = features.dot(&self.weights.t()) + &self.bias;
        Ok(softmax_rows(&logits))
    }

    /// Most likely class label per sample.
    pub fn predict(&self, features: &Array2<f32>) -> LearnerResult<Vec<usize>> {
        let proba = self.predict_proba(features)?;
        Ok(proba
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
                    .map(|(idx, _)| idx)
                    .unwrap_or(0)
            })
            .collect())
    }
}

/// Row-wise softmax with max subtraction for numeric stability.
fn softmax_rows(logits: &Array2<f32>) -> Array2<f32> {
    let mut out = logits.clone();
    for mut row in out.rows_mut() {
        let max = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    out
}

impl Checkpointable for LogisticRegression {
    fn save_checkpoint<P: AsRef<Path>>(&self, path: P) -> Result<(), CheckpointError> {
        let snapshot = ModelSnapshot {
            version: MODEL_SCHEMA_VERSION,
            n_classes: self.n_classes(),
            n_features: self.n_features(),
            weights: self.weights.iter().cloned().collect(),
            bias: self.bias.iter().cloned().collect(),
        };
        write_snapshot(&snapshot, path)
    }

    fn load_checkpoint<P: AsRef<Path>>(path: P) -> Result<Self, CheckpointError> {
        let snapshot: ModelSnapshot = read_snapshot(path)?;

        if snapshot.version != MODEL_SCHEMA_VERSION {
            return Err(CheckpointError::VersionMismatch {
                expected: MODEL_SCHEMA_VERSION,
                found: snapshot.version,
            });
        }
        if snapshot.weights.len() != snapshot.n_classes * snapshot.n_features {
            return Err(CheckpointError::InvalidFormat(format!(
                "weight count {} does not match {}x{}",
                snapshot.weights.len(),
                snapshot.n_classes,
                snapshot.n_features
            )));
        }
        if snapshot.bias.len() != snapshot.n_classes {
            return Err(CheckpointError::InvalidFormat(format!(
                "bias count {} does not match {} classes",
                snapshot.bias.len(),
                snapshot.n_classes
            )));
        }

        let weights =
            Array2::from_shape_vec((snapshot.n_classes, snapshot.n_features), snapshot.weights)
                .map_err(|err| CheckpointError::InvalidFormat(err.to_string()))?;
        let bias = Array1::from_vec(snapshot.bias);

        Ok(Self { weights, bias })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use crate::data::synthetic;

    fn train_config() -> TrainingConfig {
        TrainingConfig {
            max_iter: 200,
            learning_rate: 0.1,
            random_state: 42,
        }
    }

    fn dataset() -> synthetic::Dataset {
        synthetic::generate(&DataConfig {
            n_samples: 200,
            n_features: 4,
            n_classes: 2,
            random_state: 42,
        })
    }

    #[test]
    fn probabilities_form_distributions() {
        let data = dataset();
        let model = LogisticRegression::fit(&data.features, &data.labels, 2, &train_config())
            .unwrap();

        let proba = model.predict_proba(&data.features).unwrap();
        assert_eq!(proba.dim(), (200, 2));
        for row in proba.rows() {
            let sum: f32 = row.sum();
            assert!((sum - 1.0).abs() < 1e-5);
            assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
    }

    #[test]
    fn fit_beats_chance_on_separable_data() {
        let data = dataset();
        let model = LogisticRegression::fit(&data.features, &data.labels, 2, &train_config())
            .unwrap();

        let predictions = model.predict(&data.features).unwrap();
        let correct = predictions
            .iter()
            .zip(&data.labels)
            .filter(|(p, l)| p == l)
            .count();
        assert!(correct as f32 / 200.0 > 0.7);
    }

    #[test]
    fn fit_is_deterministic() {
        let data = dataset();
        let a = LogisticRegression::fit(&data.features, &data.labels, 2, &train_config()).unwrap();
        let b = LogisticRegression::fit(&data.features, &data.labels, 2, &train_config()).unwrap();

        assert_eq!(a.weights, b.weights);
        assert_eq!(a.bias, b.bias);
    }

    #[test]
    fn fit_rejects_mismatched_labels() {
        let data = dataset();
        let result =
            LogisticRegression::fit(&data.features, &data.labels[..10], 2, &train_config());
        assert!(matches!(result, Err(LearnerError::ShapeMismatch { .. })));
    }

    #[test]
    fn fit_rejects_out_of_range_labels() {
        let data = dataset();
        let mut labels = data.labels.clone();
        labels[0] = 5;
        let result = LogisticRegression::fit(&data.features, &labels, 2, &train_config());
        assert!(matches!(result, Err(LearnerError::InvalidParameter { .. })));
    }

    #[test]
    fn predict_rejects_wrong_width() {
        let data = dataset();
        let model = LogisticRegression::fit(&data.features, &data.labels, 2, &train_config())
            .unwrap();

        let narrow = Array2::<f32>::zeros((3, 2));
        assert!(matches!(
            model.predict_proba(&narrow),
            Err(LearnerError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn checkpoint_round_trip_preserves_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let data = dataset();
        let model = LogisticRegression::fit(&data.features, &data.labels, 2, &train_config())
            .unwrap();
        model.save_checkpoint(&path).unwrap();

        let restored = LogisticRegression::load_checkpoint(&path).unwrap();
        assert_eq!(restored.weights, model.weights);
        assert_eq!(restored.bias, model.bias);

        let before = model.predict_proba(&data.features).unwrap();
        let after = restored.predict_proba(&data.features).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn load_rejects_foreign_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let snapshot = ModelSnapshot {
            version: 99,
            n_classes: 2,
            n_features: 1,
            weights: vec![0.0, 0.0],
            bias: vec![0.0, 0.0],
        };
        write_snapshot(&snapshot, &path).unwrap();

        assert!(matches!(
            LogisticRegression::load_checkpoint(&path),
            Err(CheckpointError::VersionMismatch {
                expected: MODEL_SCHEMA_VERSION,
                found: 99
            })
        ));
    }
}
