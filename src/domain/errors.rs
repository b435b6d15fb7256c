// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure mode of the training harness and the inference
// pipeline has exactly one variant here. The CLI layer collapses
// all of them into a single user-visible message and logs the
// internal kind — a person making a health-related decision
// should never see implementation detail.

use thiserror::Error;

/// All domain-level failures of the system.
#[derive(Debug, Error)]
pub enum CardioError {
    /// A categorical label outside the closed set for its feature.
    #[error("unknown category '{label}' for feature '{feature}'")]
    UnknownCategory { feature: &'static str, label: String },

    /// A numeric value outside the physiologically plausible range.
    #[error("value {value} for feature '{feature}' outside plausible range {min}..={max}")]
    InvalidRange {
        feature: &'static str,
        value:   f64,
        min:     f64,
        max:     f64,
    },

    /// Stored scaler parameters carry a non-positive standard
    /// deviation. `fit` never produces this (it substitutes 1.0 for
    /// constant columns), so seeing it at apply time means the
    /// persisted artifact is corrupt.
    #[error("degenerate standard deviation for feature '{feature}'")]
    DegenerateFeature { feature: &'static str },

    /// The training table is empty or contains only one class label.
    #[error("insufficient training data: {0}")]
    InsufficientData(String),

    /// No artifact has been saved yet.
    #[error("no trained artifact found at '{path}' — run 'train' first")]
    ArtifactMissing { path: String },

    /// A raw input slot arrived as the unset sentinel.
    #[error("input for feature '{feature}' is missing")]
    IncompleteInput { feature: &'static str },
}
