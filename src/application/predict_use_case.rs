// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Loads the persisted bundle once, then serves single-record
// predictions. Construction fails if no training run has saved a
// bundle yet (`ArtifactMissing`); prediction fails on incomplete
// or implausible inputs. Nothing is retried or guessed — a record
// that cannot be encoded never reaches the model.

use anyhow::Result;

use crate::domain::schema::{RawValue, FEATURE_COUNT};
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    inferencer: Inferencer,
}

impl PredictUseCase {
    pub fn new(artifact_dir: String) -> Result<Self> {
        let store      = ArtifactStore::new(artifact_dir);
        let inferencer = Inferencer::from_store(&store)?;
        Ok(Self { inferencer })
    }

    /// Run the pipeline for one raw input record.
    /// Returns 0 (low risk) or 1 (high risk).
    pub fn predict(&self, raw: &[RawValue; FEATURE_COUNT]) -> Result<u8> {
        self.inferencer.predict(raw)
    }
}
