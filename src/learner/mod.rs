//! Learner module - the predictive model and its quality control.
//!
//! Components, leaves first:
//! - [`uncertainty`] - pure entropy/margin metrics over class distributions
//! - [`critic`] - entropy-thresholded quality gate
//! - [`classifier`] - logistic regression fitted by gradient descent
//! - [`model`] - trainable base model with persisted state
//! - [`feedback`] - buffer of samples flagged for retraining
//! - [`retrainer`] - full retrain on canonical data plus feedback

pub mod classifier;
pub mod critic;
pub mod error;
pub mod feedback;
pub mod model;
pub mod retrainer;
pub mod uncertainty;

pub use classifier::LogisticRegression;
pub use critic::Critic;
pub use error::{LearnerError, LearnerResult};
pub use feedback::FeedbackBuffer;
pub use model::BaseModel;
pub use retrainer::Retrainer;
pub use uncertainty::{margin, shannon_entropy};
