use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

fn ensure_dir<P: AsRef<Path>>(dir: P) -> io::Result<()> {
    fs::create_dir_all(dir)
}

pub(crate) fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

fn append_text_line<P: AsRef<Path>>(path: P, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Serialize)]
pub struct IterationLogEntry {
    pub iteration: usize,
    pub accuracy: f32,
    pub feedback_count: usize,
    pub retrained: bool,
    pub timestamp_ms: u128,
}

/// Append one loop iteration to the JSONL run log and the text training log.
///
/// The text line follows the `Iteration <int>: Accuracy <float>` contract
/// consumed by [`crate::plot::plot_accuracy`].
pub fn log_iteration<P: AsRef<Path>>(
    log_dir: P,
    iteration: usize,
    accuracy: f32,
    feedback_count: usize,
    retrained: bool,
) -> io::Result<()> {
    let log_dir = log_dir.as_ref();
    ensure_dir(log_dir)?;

    append_text_line(
        log_dir.join("training.log"),
        &format!("Iteration {}: Accuracy {}", iteration, accuracy),
    )?;

    let entry = IterationLogEntry {
        iteration,
        accuracy,
        feedback_count,
        retrained,
        timestamp_ms: timestamp_ms(),
    };
    append_json_line(log_dir.join("run.jsonl"), &entry)
}

/// Append a serializable metrics record to the append-only metrics log.
pub fn log_metrics<P: AsRef<Path>, T: Serialize>(log_dir: P, metrics: &T) -> io::Result<()> {
    let log_dir = log_dir.as_ref();
    ensure_dir(log_dir)?;
    append_json_line(log_dir.join("metrics.jsonl"), metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_log_appends_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        log_iteration(dir.path(), 0, 0.9, 12, false).unwrap();
        log_iteration(dir.path(), 1, 0.925, 30, true).unwrap();

        let text = fs::read_to_string(dir.path().join("training.log")).unwrap();
        assert_eq!(
            text,
            "Iteration 0: Accuracy 0.9\nIteration 1: Accuracy 0.925\n"
        );

        let jsonl = fs::read_to_string(dir.path().join("run.jsonl")).unwrap();
        assert_eq!(jsonl.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(jsonl.lines().next().unwrap()).unwrap();
        assert_eq!(first["iteration"], 0);
        assert_eq!(first["feedback_count"], 12);
    }

    #[test]
    fn metrics_log_is_append_only() {
        let dir = tempfile::tempdir().unwrap();
        log_metrics(dir.path(), &serde_json::json!({"accuracy": 0.75})).unwrap();
        log_metrics(dir.path(), &serde_json::json!({"accuracy": 0.8})).unwrap();

        let jsonl = fs::read_to_string(dir.path().join("metrics.jsonl")).unwrap();
        assert_eq!(jsonl.lines().count(), 2);
    }
}
