// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Persists the output of a training run: the fitted scaler
// parameters and the selected classifier, as ONE bincode blob at
// a fixed name. Bundling them is deliberate — a scaler from one
// run paired with a model from another is undefined behaviour for
// the whole system, so the storage scheme makes the pairing
// impossible to break: both are overwritten together or neither
// is visible.
//
// Atomicity: the bundle is written to a temp file in the same
// directory and renamed over the final name. A concurrent reader
// sees either the complete old bundle or the complete new one.
//
// Files in the artifact directory:
//   model.bin         ← scaler + classifier (the serving artifact)
//   train_report.json ← selection report (observability only)
//
// Reference: Rust Book §9 (Error Handling)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::scaler::ScalerParams;
use crate::domain::errors::CardioError;
use crate::infra::metrics::SelectionReport;
use crate::ml::model::ClassifierArtifact;

const BUNDLE_FILE: &str = "model.bin";
const REPORT_FILE: &str = "train_report.json";

/// The single persisted unit: scaler and classifier from the SAME
/// training run, never stored or loaded separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub scaler: ScalerParams,
    pub model:  ClassifierArtifact,
}

/// Manages the one current-version artifact slot on disk.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `dir`, creating the directory if
    /// it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    fn bundle_path(&self) -> PathBuf {
        self.dir.join(BUNDLE_FILE)
    }

    /// Persist scaler + classifier as a single atomic update.
    pub fn save(&self, bundle: &ArtifactBundle) -> Result<()> {
        let bytes = bincode::serialize(bundle).context("cannot serialize artifact bundle")?;

        // Temp file in the SAME directory so the rename below is a
        // same-filesystem move, which is atomic.
        let tmp_path = self.dir.join(format!("{BUNDLE_FILE}.tmp.{}", std::process::id()));
        fs::write(&tmp_path, &bytes)
            .with_context(|| format!("cannot write '{}'", tmp_path.display()))?;
        fs::rename(&tmp_path, self.bundle_path())
            .with_context(|| format!("cannot move bundle into '{}'", self.dir.display()))?;

        tracing::debug!(
            "Saved artifact bundle ({} bytes) to '{}'",
            bytes.len(),
            self.bundle_path().display(),
        );
        Ok(())
    }

    /// Load the current bundle. Fails with `ArtifactMissing` if no
    /// training run has saved one yet.
    pub fn load(&self) -> Result<ArtifactBundle> {
        let path = self.bundle_path();
        if !path.exists() {
            return Err(CardioError::ArtifactMissing {
                path: path.display().to_string(),
            }
            .into());
        }

        let bytes = fs::read(&path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;
        let bundle = bincode::deserialize(&bytes)
            .with_context(|| format!("corrupt artifact bundle at '{}'", path.display()))?;
        Ok(bundle)
    }

    /// Write the selection report next to the bundle, pretty JSON.
    pub fn save_report(&self, report: &SelectionReport) -> Result<()> {
        let path = self.dir.join(REPORT_FILE);
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write report to '{}'", path.display()))?;
        tracing::debug!("Saved selection report to '{}'", path.display());
        Ok(())
    }

    /// Read back the report of the last training run. Fails with
    /// `ArtifactMissing` if no run has written one yet.
    pub fn load_report(&self) -> Result<SelectionReport> {
        let path = self.dir.join(REPORT_FILE);
        if !path.exists() {
            return Err(CardioError::ArtifactMissing {
                path: path.display().to_string(),
            }
            .into());
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("cannot read report at '{}'", path.display()))?;
        let report = serde_json::from_str(&json)
            .with_context(|| format!("corrupt report at '{}'", path.display()))?;
        Ok(report)
    }
}
