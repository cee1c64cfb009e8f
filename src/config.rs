//! Loop configuration management via TOML files.
//!
//! A single [`LoopConfig`] is parsed and validated once, then passed into
//! each component; no component reads configuration on its own.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Complete configuration for one self-improvement run.
///
/// # Examples
///
/// ```
/// use entropic_feedback_core::config::LoopConfig;
///
/// let config = LoopConfig::from_str(
///     "[data]\nn_samples = 200\nn_features = 4\n\n[feedback]\nretrain_batch_size = 10",
/// )
/// .unwrap();
/// assert_eq!(config.data.n_samples, 200);
/// assert_eq!(config.feedback.retrain_batch_size, 10);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct LoopConfig {
    /// Synthetic dataset generation parameters.
    pub data: DataConfig,
    /// Classifier fitting parameters.
    pub training: TrainingConfig,
    /// Critic strictness and artifact location.
    pub model: ModelConfig,
    /// Feedback accumulation parameters.
    pub feedback: FeedbackConfig,
    /// Loop execution parameters.
    pub run: RunConfig,
}

/// Synthetic dataset generation parameters.
#[derive(Debug, Clone, Serialize)]
pub struct DataConfig {
    /// Total number of samples in the canonical dataset.
    pub n_samples: usize,
    /// Feature-vector dimensionality.
    pub n_features: usize,
    /// Number of class labels.
    pub n_classes: usize,
    /// Seed controlling deterministic generation.
    pub random_state: u64,
}

/// Classifier fitting parameters.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingConfig {
    /// Gradient-descent epoch budget for one fit.
    pub max_iter: usize,
    /// Fixed learning rate.
    pub learning_rate: f32,
    /// Seed for weight initialization.
    pub random_state: u64,
}

/// Critic strictness and persisted artifact location.
#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    /// Strictness in [0, 1]; higher tolerates less entropy.
    pub critic_threshold: f32,
    /// Path of the persisted model artifact.
    pub path: PathBuf,
}

/// Feedback accumulation parameters.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackConfig {
    /// Buffer size at which a retrain is triggered.
    pub retrain_batch_size: usize,
}

/// Loop execution parameters.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// Number of loop iterations to execute.
    pub iterations: usize,
    /// Fraction of the canonical dataset held out for evaluation.
    pub eval_ratio: f32,
    /// Seed for the train/evaluation partition shuffle.
    pub split_seed: u64,
    /// Directory receiving the training log and JSONL records.
    pub log_dir: PathBuf,
}

impl LoopConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawLoopConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        Ok(Self {
            data: DataConfig::try_from(&raw.data)?,
            training: TrainingConfig::try_from(&raw.training)?,
            model: ModelConfig::try_from(&raw.model)?,
            feedback: FeedbackConfig::try_from(&raw.feedback)?,
            run: RunConfig::try_from(&raw.run)?,
        })
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::from_str("").expect("empty configuration uses defaults")
    }
}

impl DataConfig {
    fn try_from(raw: &RawDataConfig) -> Result<Self, ConfigError> {
        if raw.n_samples == 0 {
            return Err(ConfigError::Parse("data.n_samples must be ≥ 1".into()));
        }
        if raw.n_features == 0 {
            return Err(ConfigError::Parse("data.n_features must be ≥ 1".into()));
        }
        if raw.n_classes < 2 {
            return Err(ConfigError::Parse("data.n_classes must be ≥ 2".into()));
        }

        Ok(Self {
            n_samples: raw.n_samples,
            n_features: raw.n_features,
            n_classes: raw.n_classes,
            random_state: raw.random_state,
        })
    }
}

impl TrainingConfig {
    fn try_from(raw: &RawTrainingConfig) -> Result<Self, ConfigError> {
        if raw.max_iter == 0 {
            return Err(ConfigError::Parse("training.max_iter must be ≥ 1".into()));
        }
        if !raw.learning_rate.is_finite() || raw.learning_rate <= 0.0 {
            return Err(ConfigError::Parse(
                "training.learning_rate must be positive".into(),
            ));
        }

        Ok(Self {
            max_iter: raw.max_iter,
            learning_rate: raw.learning_rate,
            random_state: raw.random_state,
        })
    }
}

impl ModelConfig {
    fn try_from(raw: &RawModelConfig) -> Result<Self, ConfigError> {
        if !raw.critic_threshold.is_finite()
            || !(0.0..=1.0).contains(&raw.critic_threshold)
        {
            return Err(ConfigError::Parse(
                "model.critic_threshold must be in [0, 1]".into(),
            ));
        }
        if raw.path.is_empty() {
            return Err(ConfigError::Parse("model.path must be non-empty".into()));
        }

        Ok(Self {
            critic_threshold: raw.critic_threshold,
            path: PathBuf::from(&raw.path),
        })
    }
}

impl FeedbackConfig {
    fn try_from(raw: &RawFeedbackConfig) -> Result<Self, ConfigError> {
        if raw.retrain_batch_size == 0 {
            return Err(ConfigError::Parse(
                "feedback.retrain_batch_size must be ≥ 1".into(),
            ));
        }

        Ok(Self {
            retrain_batch_size: raw.retrain_batch_size,
        })
    }
}

impl RunConfig {
    fn try_from(raw: &RawRunConfig) -> Result<Self, ConfigError> {
        if raw.iterations == 0 {
            return Err(ConfigError::Parse("run.iterations must be ≥ 1".into()));
        }
        if !raw.eval_ratio.is_finite() || raw.eval_ratio <= 0.0 || raw.eval_ratio >= 1.0 {
            return Err(ConfigError::Parse(
                "run.eval_ratio must be strictly between 0 and 1".into(),
            ));
        }
        if raw.log_dir.is_empty() {
            return Err(ConfigError::Parse("run.log_dir must be non-empty".into()));
        }

        Ok(Self {
            iterations: raw.iterations,
            eval_ratio: raw.eval_ratio,
            split_seed: raw.split_seed,
            log_dir: PathBuf::from(&raw.log_dir),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawLoopConfig {
    #[serde(default)]
    data: RawDataConfig,
    #[serde(default)]
    training: RawTrainingConfig,
    #[serde(default)]
    model: RawModelConfig,
    #[serde(default)]
    feedback: RawFeedbackConfig,
    #[serde(default)]
    run: RawRunConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawDataConfig {
    n_samples: usize,
    n_features: usize,
    n_classes: usize,
    random_state: u64,
}

impl Default for RawDataConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            n_features: 20,
            n_classes: 2,
            random_state: 42,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawTrainingConfig {
    max_iter: usize,
    learning_rate: f32,
    random_state: u64,
}

impl Default for RawTrainingConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 0.1,
            random_state: 42,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawModelConfig {
    critic_threshold: f32,
    path: String,
}

impl Default for RawModelConfig {
    fn default() -> Self {
        Self {
            critic_threshold: 0.6,
            path: "models/base_model.bin".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawFeedbackConfig {
    retrain_batch_size: usize,
}

impl Default for RawFeedbackConfig {
    fn default() -> Self {
        Self {
            retrain_batch_size: 50,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawRunConfig {
    iterations: usize,
    eval_ratio: f32,
    split_seed: u64,
    log_dir: String,
}

impl Default for RawRunConfig {
    fn default() -> Self {
        Self {
            iterations: 5,
            eval_ratio: 0.2,
            split_seed: 42,
            log_dir: "experiments".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_sections_missing() {
        let config = LoopConfig::from_str("").unwrap();
        assert_eq!(config.data.n_samples, 1000);
        assert_eq!(config.data.n_features, 20);
        assert_eq!(config.data.n_classes, 2);
        assert_eq!(config.training.max_iter, 1000);
        assert_eq!(config.feedback.retrain_batch_size, 50);
        assert_eq!(config.run.iterations, 5);
    }

    #[test]
    fn parses_custom_values() {
        let toml = "\
[data]
n_samples = 500
n_features = 8
random_state = 7

[model]
critic_threshold = 0.85
path = \"artifacts/model.bin\"

[run]
iterations = 3
";
        let config = LoopConfig::from_str(toml).unwrap();
        assert_eq!(config.data.n_samples, 500);
        assert_eq!(config.data.n_features, 8);
        assert_eq!(config.data.random_state, 7);
        assert!((config.model.critic_threshold - 0.85).abs() < 1e-6);
        assert_eq!(config.model.path, PathBuf::from("artifacts/model.bin"));
        assert_eq!(config.run.iterations, 3);
        // Untouched sections keep defaults.
        assert_eq!(config.training.max_iter, 1000);
    }

    #[test]
    fn rejects_out_of_range_critic_threshold() {
        let toml = "[model]\ncritic_threshold = 1.5";
        assert!(matches!(
            LoopConfig::from_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_zero_batch_size() {
        let toml = "[feedback]\nretrain_batch_size = 0";
        assert!(matches!(
            LoopConfig::from_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_degenerate_eval_ratio() {
        let toml = "[run]\neval_ratio = 1.0";
        assert!(matches!(
            LoopConfig::from_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }
}
