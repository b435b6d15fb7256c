// ============================================================
// Layer 4 — Standard Scaler
// ============================================================
// Standardization: z = (x - mean) / std, per feature column.
//
// `fit` runs exactly once per training run, on the TRAINING
// partition only — the test partition must never influence the
// fitted parameters (information leakage). `apply`/`transform`
// are the single code path used for the training split, the test
// split, and every later serving input. That identity is the core
// correctness invariant of the whole system: any second
// implementation of the scaling arithmetic would be a place for
// train/serve skew to hide.
//
// Zero-std policy (explicit, not silent): a constant column gets
// its std replaced by 1.0 so downstream division is well defined,
// and a warning names the column. This keeps training robust to
// degenerate data instead of failing the whole run.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::domain::errors::CardioError;
use crate::domain::record::FeatureVector;
use crate::domain::schema::{FEATURE_COUNT, FEATURE_NAMES};

/// Per-feature (mean, std) fitted on the training partition.
/// Immutable after fitting; overwritten only by a full retraining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub std:  Vec<f64>,
}

impl ScalerParams {
    /// Fit per-column mean and population standard deviation.
    ///
    /// Columns with zero std are recorded with std 1.0 (see the
    /// module policy above).
    pub fn fit(train: &Array2<f64>) -> Self {
        debug_assert_eq!(train.ncols(), FEATURE_COUNT);

        let n = train.nrows() as f64;
        let mean: Vec<f64> = train
            .mean_axis(Axis(0))
            .map(|m| m.to_vec())
            .unwrap_or_else(|| vec![0.0; FEATURE_COUNT]);

        let std: Vec<f64> = (0..train.ncols())
            .map(|col| {
                let m = mean[col];
                let var = train
                    .column(col)
                    .iter()
                    .map(|&x| (x - m) * (x - m))
                    .sum::<f64>()
                    / n;
                let s = var.sqrt();
                if s == 0.0 {
                    tracing::warn!(
                        "feature '{}' is constant in the training partition; using std=1.0",
                        FEATURE_NAMES[col],
                    );
                    1.0
                } else {
                    s
                }
            })
            .collect();

        Self { mean, std }
    }

    /// Scale a single encoded feature vector. Pure: `self` is
    /// untouched, the input is untouched.
    ///
    /// Fails with `DegenerateFeature` if the stored params carry a
    /// non-positive std — `fit` never produces one, so this only
    /// fires on a corrupt persisted artifact.
    pub fn apply(&self, vector: &FeatureVector) -> Result<[f64; FEATURE_COUNT], CardioError> {
        let mut scaled = [0.0f64; FEATURE_COUNT];
        for (col, slot) in scaled.iter_mut().enumerate() {
            let s = self.std[col];
            if s <= 0.0 {
                return Err(CardioError::DegenerateFeature { feature: FEATURE_NAMES[col] });
            }
            *slot = (vector.0[col] - self.mean[col]) / s;
        }
        Ok(scaled)
    }

    /// Scale a whole matrix row by row with the same arithmetic as
    /// `apply`. Used on both partitions during training.
    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, CardioError> {
        let mut out = data.clone();
        for mut row in out.rows_mut() {
            let mut vec = [0.0f64; FEATURE_COUNT];
            vec.copy_from_slice(row.as_slice().expect("row is contiguous"));
            let scaled = self.apply(&FeatureVector(vec))?;
            for (slot, v) in row.iter_mut().zip(scaled.iter()) {
                *slot = *v;
            }
        }
        Ok(out)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// A small matrix with one varying value per column so fit is
    /// well defined everywhere.
    fn sample_matrix() -> Array2<f64> {
        let mut m = Array2::zeros((4, FEATURE_COUNT));
        for row in 0..4 {
            for col in 0..FEATURE_COUNT {
                m[[row, col]] = (row as f64 + 1.0) * (col as f64 + 1.0);
            }
        }
        m
    }

    #[test]
    fn test_fit_then_transform_standardizes_training_data() {
        let train  = sample_matrix();
        let params = ScalerParams::fit(&train);
        let scaled = params.transform(&train).unwrap();

        // Each column of the scaled TRAINING data must have
        // mean ~0 and std ~1 — the fit/apply round trip.
        for col in 0..FEATURE_COUNT {
            let column: Vec<f64> = scaled.column(col).to_vec();
            let mean = column.iter().sum::<f64>() / column.len() as f64;
            let var = column.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>()
                / column.len() as f64;
            assert!(mean.abs() < 1e-9, "col {col} mean {mean}");
            assert!((var.sqrt() - 1.0).abs() < 1e-9, "col {col} std {}", var.sqrt());
        }
    }

    #[test]
    fn test_constant_column_gets_std_one() {
        let mut train = sample_matrix();
        for row in 0..4 {
            train[[row, 5]] = 7.0; // constant fbs column
        }
        let params = ScalerParams::fit(&train);
        assert_eq!(params.std[5], 1.0);
        assert_eq!(params.mean[5], 7.0);

        // And transform must not fail on the degenerate column
        let scaled = params.transform(&train).unwrap();
        for row in 0..4 {
            assert_eq!(scaled[[row, 5]], 0.0);
        }
    }

    #[test]
    fn test_apply_does_not_mutate_params() {
        let train  = sample_matrix();
        let params = ScalerParams::fit(&train);
        let before = params.clone();

        let vector = FeatureVector([1.0; FEATURE_COUNT]);
        params.apply(&vector).unwrap();
        assert_eq!(params, before);
    }

    #[test]
    fn test_corrupt_params_rejected_at_apply() {
        let train  = sample_matrix();
        let mut params = ScalerParams::fit(&train);
        params.std[3] = 0.0; // simulate a damaged artifact

        let vector = FeatureVector([1.0; FEATURE_COUNT]);
        let err = params.apply(&vector).unwrap_err();
        assert!(matches!(err, CardioError::DegenerateFeature { feature: "trestbps" }));
    }

    #[test]
    fn test_apply_matches_transform_row() {
        // Single-vector apply and matrix transform must be the
        // same arithmetic — this is the train/serve identity.
        let train  = sample_matrix();
        let params = ScalerParams::fit(&train);
        let scaled = params.transform(&train).unwrap();

        let mut row0 = [0.0f64; FEATURE_COUNT];
        row0.copy_from_slice(train.row(0).as_slice().unwrap());
        let single = params.apply(&FeatureVector(row0)).unwrap();

        for col in 0..FEATURE_COUNT {
            assert_eq!(single[col], scaled[[0, col]]);
        }
    }
}
