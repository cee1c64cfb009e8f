//! The self-improvement loop.
//!
//! Drives a fixed budget of evaluate → criticize → accumulate → retrain
//! iterations against a stable held-out partition of the canonical dataset.
//! Every iteration reloads the persisted model, so a retrain in iteration k
//! is what iteration k+1 evaluates.
//!
//! True labels stand in for a label oracle here: this is a simulated loop
//! with ground truth available. A production integration would source
//! corrected labels for flagged samples from an external oracle
//! (human-in-the-loop or otherwise) at the same call site.

use serde::Serialize;

use crate::config::LoopConfig;
use crate::learner::critic::Critic;
use crate::learner::error::{LearnerError, LearnerResult};
use crate::learner::feedback::FeedbackBuffer;
use crate::learner::model::BaseModel;
use crate::learner::retrainer::Retrainer;
use crate::logging;
use crate::metrics::ClassificationMetrics;

/// Progress of one loop iteration.
#[derive(Debug, Clone, Serialize)]
pub struct IterationRecord {
    pub iteration: usize,
    /// Accuracy over the held-out evaluation partition.
    pub accuracy: f32,
    /// Buffer size after this iteration's accumulation, before any reset.
    pub feedback_count: usize,
    /// Whether this iteration's buffer crossed the threshold and retrained.
    pub retrained: bool,
}

/// Result of a complete loop run.
#[derive(Debug, Clone, Serialize)]
pub struct LoopReport {
    pub iterations: Vec<IterationRecord>,
    pub retrains: usize,
}

impl LoopReport {
    /// Accuracy of the final iteration.
    pub fn final_accuracy(&self) -> f32 {
        self.iterations.last().map(|r| r.accuracy).unwrap_or(0.0)
    }
}

/// Orchestrates the uncertainty-driven self-improvement loop.
///
/// Single-threaded by design; exactly one loop instance may operate a given
/// persisted model path at a time. The first failure in any iteration aborts
/// the run; retrains persisted by earlier iterations remain on disk.
pub struct FeedbackLoop {
    config: LoopConfig,
    model: BaseModel,
    critic: Critic,
    retrainer: Retrainer,
    buffer: FeedbackBuffer,
}

impl FeedbackLoop {
    pub fn new(config: LoopConfig) -> LearnerResult<Self> {
        let model = BaseModel::new(&config);
        let critic = Critic::new(config.model.critic_threshold, config.data.n_classes)?;

        Ok(Self {
            config,
            model,
            critic,
            retrainer: Retrainer::new(),
            buffer: FeedbackBuffer::new(),
        })
    }

    /// Samples currently buffered for the next retrain.
    pub fn feedback_len(&self) -> usize {
        self.buffer.len()
    }

    /// Run the configured number of iterations.
    pub fn run(&mut self) -> LearnerResult<LoopReport> {
        // Bootstrap: establish a persisted model before the first iteration.
        if !self.model.is_persisted() {
            let canonical = self.model.generate_data();
            self.model.train(&canonical.features, &canonical.labels)?;
            self.model.save()?;
        }

        // Fixed split: the evaluation partition is generated once and held
        // stable across every iteration of this run.
        let canonical = self.model.generate_data();
        let (_train, eval) = canonical.split(self.config.run.eval_ratio, self.config.run.split_seed);
        if eval.is_empty() {
            return Err(LearnerError::InvalidParameter {
                parameter: "run.eval_ratio".to_string(),
                value: self.config.run.eval_ratio.to_string(),
                constraint: "a non-empty evaluation partition".to_string(),
            });
        }

        let mut iterations = Vec::with_capacity(self.config.run.iterations);
        let mut retrains = 0;

        for iteration in 0..self.config.run.iterations {
            // Always evaluate the latest persisted artifact, including
            // retrains from earlier iterations.
            self.model.load()?;

            let predictions = self.model.predict(&eval.features)?;
            let proba = self.model.predict_proba(&eval.features)?;
            let quality = self.critic.evaluate(&proba);

            for i in 0..eval.len() {
                if !quality[i] || predictions[i] != eval.labels[i] {
                    self.buffer.push(eval.features.row(i), eval.labels[i]);
                }
            }

            let correct = predictions
                .iter()
                .zip(&eval.labels)
                .filter(|(pred, truth)| pred == truth)
                .count();
            let accuracy = correct as f32 / eval.len() as f32;
            let feedback_count = self.buffer.len();

            println!(
                "Iteration {}: Accuracy {}, Feedback collected: {}",
                iteration, accuracy, feedback_count
            );

            let retrained = feedback_count >= self.config.feedback.retrain_batch_size;
            if retrained {
                let (features, labels) = self.buffer.drain();
                self.retrainer.retrain(&mut self.model, &features, &labels)?;
                retrains += 1;
            }

            logging::log_iteration(
                &self.config.run.log_dir,
                iteration,
                accuracy,
                feedback_count,
                retrained,
            )?;

            iterations.push(IterationRecord {
                iteration,
                accuracy,
                feedback_count,
                retrained,
            });
        }

        Ok(LoopReport {
            iterations,
            retrains,
        })
    }
}

/// Train the base model on the canonical dataset and persist it.
pub fn train_once(config: &LoopConfig) -> LearnerResult<()> {
    let mut model = BaseModel::new(config);
    let canonical = model.generate_data();
    model.train(&canonical.features, &canonical.labels)?;
    model.save()
}

/// Evaluation summary of the persisted model on the held-out partition.
#[derive(Debug, Clone, Serialize)]
pub struct EvalSummary {
    pub metrics: ClassificationMetrics,
    /// Fraction of evaluation samples the critic accepts.
    pub high_quality_fraction: f32,
}

/// Evaluate the persisted model once, logging the metrics record.
pub fn evaluate_once(config: &LoopConfig) -> LearnerResult<EvalSummary> {
    let mut model = BaseModel::new(config);
    model.load()?;
    let critic = Critic::new(config.model.critic_threshold, config.data.n_classes)?;

    let canonical = model.generate_data();
    let (_train, eval) = canonical.split(config.run.eval_ratio, config.run.split_seed);
    if eval.is_empty() {
        return Err(LearnerError::InvalidParameter {
            parameter: "run.eval_ratio".to_string(),
            value: config.run.eval_ratio.to_string(),
            constraint: "a non-empty evaluation partition".to_string(),
        });
    }

    let predictions = model.predict(&eval.features)?;
    let proba = model.predict_proba(&eval.features)?;
    let quality = critic.evaluate(&proba);

    let metrics = ClassificationMetrics::compute(&eval.labels, &predictions);
    let high_quality_fraction =
        quality.iter().filter(|&&q| q).count() as f32 / quality.len() as f32;

    let summary = EvalSummary {
        metrics,
        high_quality_fraction,
    };
    logging::log_metrics(&config.run.log_dir, &summary)?;

    Ok(summary)
}
