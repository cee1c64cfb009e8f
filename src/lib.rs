//! # Entropic Feedback Core
//!
//! An uncertainty-driven self-improvement loop for a linear classifier.
//! A base predictor is evaluated against a stable held-out partition, a
//! critic flags low-confidence or incorrect predictions by Shannon entropy,
//! flagged samples accumulate as feedback, and once enough feedback accrues
//! the predictor is fully retrained on the union of canonical and feedback
//! data and persisted.
//!
//! ## Quick Start
//!
//! ```rust
//! use entropic_feedback_core::learner::{shannon_entropy, Critic};
//! use ndarray::array;
//!
//! // Per-sample class distributions from a classifier.
//! let proba = array![[0.98, 0.02], [0.5, 0.5]];
//!
//! // Confident predictions carry low entropy.
//! let entropy = shannon_entropy(&proba);
//! assert!(entropy[0] < entropy[1]);
//!
//! // The critic turns entropy into a per-sample quality gate.
//! let critic = Critic::new(0.85, 2).unwrap();
//! assert_eq!(critic.evaluate(&proba), vec![true, false]);
//! ```
//!
//! ## Core Modules
//!
//! - [`config`] - Loop configuration via TOML
//! - [`data`] - Deterministic synthetic classification data
//! - [`learner`] - Classifier, critic, feedback buffer, retrainer
//! - [`improvement`] - The self-improvement loop orchestrator
//! - [`logging`] - Training log and JSON line-delimited records
//! - [`metrics`] - Accuracy/precision/recall/F1
//! - [`plot`] - Presentational chart rendering

pub mod checkpoint;
pub mod config;
pub mod data;
pub mod improvement;
pub mod learner;
pub mod logging;
pub mod metrics;
pub mod plot;

pub use checkpoint::{CheckpointError, Checkpointable};
pub use config::{ConfigError, LoopConfig};
pub use data::synthetic::Dataset;
pub use improvement::{evaluate_once, train_once, EvalSummary, FeedbackLoop, LoopReport};
pub use learner::{
    shannon_entropy, BaseModel, Critic, FeedbackBuffer, LearnerError, LearnerResult,
    LogisticRegression, Retrainer,
};
pub use metrics::ClassificationMetrics;
