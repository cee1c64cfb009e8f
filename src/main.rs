//! Runner binary: load configuration, execute the self-improvement loop.

use anyhow::Context;

use entropic_feedback_core::{FeedbackLoop, LoopConfig};

const DEFAULT_CONFIG_PATH: &str = "config/loop.toml";

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = LoopConfig::load_from_file(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    println!("Loaded configuration from {}", config_path);
    println!(
        "Dataset: {} samples x {} features, {} classes",
        config.data.n_samples, config.data.n_features, config.data.n_classes
    );

    let mut feedback_loop = FeedbackLoop::new(config).context("failed to construct loop")?;
    let report = feedback_loop.run().context("self-improvement loop failed")?;

    println!(
        "Loop complete: {} iterations, {} retrains, final accuracy {}",
        report.iterations.len(),
        report.retrains,
        report.final_accuracy()
    );

    Ok(())
}
