// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate the schema tables     (Layer 3 - domain)
//   Step 2: Load the historical table      (Layer 4 - data)
//   Step 3: Split, scale, train, select    (Layer 5 - ml)
//   Step 4: Persist the winning bundle     (Layer 6 - infra)
//
// The use case owns nothing but the config; all state produced by
// a run lives in the Artifact Store afterwards.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::CsvLoader;
use crate::domain::schema;
use crate::domain::traits::RecordSource;
use crate::infra::artifact_store::{ArtifactBundle, ArtifactStore};
use crate::infra::metrics::SelectionReport;
use crate::ml::trainer::train_and_select;

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run needs. Serialisable so the report and
// any tooling can reproduce the run exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:    String,
    pub artifact_dir: String,
    pub split_ratio:  f64,
    pub seed:         u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:    "heart.csv".to_string(),
            artifact_dir: "artifacts".to_string(),
            split_ratio:  0.8,
            seed:         42,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end and return
    /// the selection report.
    pub fn execute(&self) -> Result<SelectionReport> {
        let cfg = &self.config;

        // ── Step 1: schema self-check ─────────────────────────────────────────
        schema::validate().map_err(|msg| anyhow!("schema table invalid: {msg}"))?;

        // ── Step 2: load the historical table ─────────────────────────────────
        tracing::info!("Loading training table from '{}'", cfg.data_path);
        let loader  = CsvLoader::new(&cfg.data_path);
        let records = loader.load_all()?;
        tracing::info!("Loaded {} labeled records", records.len());

        // ── Step 3: split / scale / train / select ────────────────────────────
        let (model, scaler, report) =
            train_and_select(&records, cfg.split_ratio, cfg.seed)?;
        report.log();

        // ── Step 4: persist both artifacts as one atomic bundle ───────────────
        let store = ArtifactStore::new(&cfg.artifact_dir);
        store.save(&ArtifactBundle { scaler, model })?;
        store.save_report(&report)?;
        tracing::info!("Artifacts saved to '{}'", cfg.artifact_dir);

        Ok(report)
    }
}
