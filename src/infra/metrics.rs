// ============================================================
// Layer 6 — Metrics and Selection Report
// ============================================================
// Classification accuracy is the single evaluation protocol:
// (# correct predictions) / (# test records). The report records
// everything needed to reproduce and audit a training run — the
// seed, the split, all three accuracies and the winner.
//
// The report is observability only. The serving path never reads
// it; the authoritative artifact is the store's binary bundle.

use serde::{Deserialize, Serialize};

use crate::ml::model::ModelKind;

/// Fraction of positions where prediction equals truth.
///
/// # Panics
/// Panics in debug builds if the slices differ in length — the
/// harness always scores a model on the partition it predicted.
pub fn accuracy(predicted: &[u8], expected: &[u8]) -> f64 {
    debug_assert_eq!(predicted.len(), expected.len());
    if expected.is_empty() {
        return 0.0;
    }
    let correct = predicted
        .iter()
        .zip(expected.iter())
        .filter(|(p, e)| p == e)
        .count();
    correct as f64 / expected.len() as f64
}

/// Everything observable about one training & selection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    /// RNG seed of the train/test split (and the forest)
    pub seed: u64,

    /// Fraction of records used for training
    pub split_ratio: f64,

    /// Partition sizes after the split
    pub n_train: usize,
    pub n_test:  usize,

    /// Held-out accuracy of each family
    pub logistic_accuracy: f64,
    pub forest_accuracy:   f64,
    pub svm_accuracy:      f64,

    /// The family that won the selection
    pub selected: ModelKind,
}

impl SelectionReport {
    /// Log the full comparison, mirroring the original run summary.
    pub fn log(&self) {
        tracing::info!("Logistic Regression accuracy: {:.4}", self.logistic_accuracy);
        tracing::info!("Random Forest accuracy:       {:.4}", self.forest_accuracy);
        tracing::info!("SVM accuracy:                 {:.4}", self.svm_accuracy);
        tracing::info!("Best model: {}", self.selected);
    }
}
