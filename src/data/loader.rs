// ============================================================
// Layer 4 — CSV Table Loader
// ============================================================
// Reads the historical table: exactly 14 named columns — the 13
// features in canonical schema order plus the `target` label.
// Categorical columns are already integer-encoded in the table;
// the schema's CategoryMap mirrors those codes, it does not
// re-encode here.
//
// The header is validated against the schema order before any row
// is parsed. A reordered or renamed column would otherwise scale
// and train on silently mislabeled features.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;

use crate::domain::record::LabeledRecord;
use crate::domain::schema::{FEATURE_COUNT, FEATURE_NAMES};
use crate::domain::traits::RecordSource;

/// Loads labeled records from a 14-column CSV file.
pub struct CsvLoader {
    path: String,
}

impl CsvLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<LabeledRecord>> {
        let file = File::open(Path::new(&self.path))
            .with_context(|| format!("cannot open training table '{}'", self.path))?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        // Header check: 13 feature columns in schema order, then `target`
        let headers = rdr.headers().context("cannot read CSV header")?.clone();
        let expected: Vec<&str> = FEATURE_NAMES.iter().copied().chain(["target"]).collect();
        let actual: Vec<&str> = headers.iter().collect();
        if actual != expected {
            bail!(
                "CSV header mismatch: expected {:?}, got {:?}",
                expected,
                actual
            );
        }

        let mut records = Vec::new();
        for (row_idx, row) in rdr.records().enumerate() {
            let row = row.with_context(|| format!("malformed CSV row {}", row_idx + 1))?;

            let mut features = [0.0f64; FEATURE_COUNT];
            for (col, slot) in features.iter_mut().enumerate() {
                *slot = row[col].parse().with_context(|| {
                    format!(
                        "row {}: column '{}' is not numeric: '{}'",
                        row_idx + 1,
                        FEATURE_NAMES[col],
                        &row[col]
                    )
                })?;
            }

            let label: u8 = row[FEATURE_COUNT].parse().with_context(|| {
                format!("row {}: target is not 0/1: '{}'", row_idx + 1, &row[FEATURE_COUNT])
            })?;
            if label > 1 {
                bail!("row {}: target must be 0 or 1, got {}", row_idx + 1, label);
            }

            records.push(LabeledRecord::new(features, label));
        }

        tracing::debug!("Loaded {} labeled records from '{}'", records.len(), self.path);
        Ok(records)
    }
}
