//! Error types for model, critic, and retraining operations.

use std::fmt;

use crate::checkpoint::CheckpointError;
use crate::config::ConfigError;

/// Result type alias for learner operations.
pub type LearnerResult<T> = Result<T, LearnerError>;

/// Error type covering the predict/train/retrain surface.
#[derive(Debug)]
pub enum LearnerError {
    /// Predict (or save) was invoked before any successful train or load.
    Untrained { operation: String },

    /// Feature dimensionality disagrees with the fitted or canonical shape.
    ShapeMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    /// A construction-time parameter is outside its valid range.
    InvalidParameter {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// Persisted artifact could not be written or read back.
    Checkpoint(CheckpointError),

    /// Configuration was missing or malformed at component construction.
    Config(ConfigError),

    /// Log or report file could not be written.
    Io(std::io::Error),
}

impl fmt::Display for LearnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearnerError::Untrained { operation } => {
                write!(
                    f,
                    "Model is untrained: operation '{}' requires a prior train() or load()",
                    operation
                )
            }
            LearnerError::ShapeMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Shape mismatch in {}: expected {} features, got {}",
                    context, expected, got
                )
            }
            LearnerError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = '{}': must satisfy {}",
                    parameter, value, constraint
                )
            }
            LearnerError::Checkpoint(err) => write!(f, "Checkpoint failure: {}", err),
            LearnerError::Config(err) => write!(f, "Configuration failure: {}", err),
            LearnerError::Io(err) => write!(f, "I/O failure: {}", err),
        }
    }
}

impl std::error::Error for LearnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LearnerError::Checkpoint(err) => Some(err),
            LearnerError::Config(err) => Some(err),
            LearnerError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CheckpointError> for LearnerError {
    fn from(err: CheckpointError) -> Self {
        LearnerError::Checkpoint(err)
    }
}

impl From<ConfigError> for LearnerError {
    fn from(err: ConfigError) -> Self {
        LearnerError::Config(err)
    }
}

impl From<std::io::Error> for LearnerError {
    fn from(err: std::io::Error) -> Self {
        LearnerError::Io(err)
    }
}
