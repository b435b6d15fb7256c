// ============================================================
// Layer 3 — Feature Vector and Labeled Record
// ============================================================
// Plain data structs with no behaviour beyond construction and
// conversion. By the time a FeatureVector exists, every slot has
// already passed through the schema's `encode` — the vector is
// in canonical column order and fully numeric.

use serde::{Deserialize, Serialize};

use crate::domain::schema::FEATURE_COUNT;

/// The 13 encoded feature values in canonical schema order.
///
/// The fixed-size array makes the two core invariants (length 13,
/// order never varies) structural rather than conventional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// One historical record: an encoded feature vector plus the
/// ground-truth label (0 = no disease, 1 = disease).
///
/// Used only during training — labeled records are never part of
/// the serving path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub features: FeatureVector,
    pub label:    u8,
}

impl LabeledRecord {
    pub fn new(features: [f64; FEATURE_COUNT], label: u8) -> Self {
        Self { features: FeatureVector(features), label }
    }
}
