//! Accumulating buffer of samples flagged for retraining.
//!
//! The orchestrator appends (feature vector, true label) pairs for every
//! evaluation sample the critic rejects or the model misclassifies. The
//! buffer only ever grows between retrains; it is drained to empty exactly
//! when a retrain is triggered from it.

use ndarray::{Array2, ArrayView1};

/// Owned feedback accumulation with explicit append/drain/size operations.
#[derive(Debug, Default)]
pub struct FeedbackBuffer {
    features: Vec<Vec<f32>>,
    labels: Vec<usize>,
}

impl FeedbackBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one flagged sample.
    pub fn push(&mut self, features: ArrayView1<f32>, label: usize) {
        if let Some(first) = self.features.first() {
            assert_eq!(
                first.len(),
                features.len(),
                "feedback sample width changed mid-buffer"
            );
        }
        self.features.push(features.to_vec());
        self.labels.push(label);
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Take all buffered samples, leaving the buffer empty.
    ///
    /// Returns the features as one matrix (N×D) alongside the labels. An
    /// empty buffer drains to a 0×0 matrix.
    pub fn drain(&mut self) -> (Array2<f32>, Vec<usize>) {
        let n = self.features.len();
        let d = self.features.first().map(Vec::len).unwrap_or(0);

        let flat: Vec<f32> = self.features.drain(..).flatten().collect();
        let features = Array2::from_shape_vec((n, d), flat)
            .expect("buffered rows share one width");
        let labels = std::mem::take(&mut self.labels);

        (features, labels)
    }

    /// Discard all buffered samples.
    pub fn clear(&mut self) {
        self.features.clear();
        self.labels.clear();
    }
}
