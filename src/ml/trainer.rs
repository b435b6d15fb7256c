// ============================================================
// Layer 5 — Training & Selection Harness
// ============================================================
// The offline batch job, in order:
//
//   Step 1: seeded train/test split            (Layer 4 - data)
//   Step 2: fit scaler on the TRAIN partition  (Layer 4 - data)
//   Step 3: scale both partitions              (Layer 4 - data)
//   Step 4: train the three families
//   Step 5: score each on the held-out split
//   Step 6: select the winner (explicit tie-break)
//
// The scaler is fitted on the training partition only — handing
// `fit` the train matrix and nothing else is how the no-leakage
// invariant is enforced, not by convention in the caller.
//
// Scoring runs through the same ClassifierArtifact decision
// functions that serve predictions later, so the selection
// measures exactly the code path that will run in production.
//
// Tie-break policy: on equal accuracy the fixed priority is
// logistic > forest > svm. The candidates are scanned in that
// order with a strict `>`, so the earliest family keeps ties.
// This is documented and tested, not an accident of comparison
// order.

use anyhow::{Context, Result};
use linfa::prelude::*;
use linfa_logistic::LogisticRegression;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};

use crate::data::scaler::ScalerParams;
use crate::data::splitter::split_train_test;
use crate::domain::errors::CardioError;
use crate::domain::record::LabeledRecord;
use crate::domain::schema::FEATURE_COUNT;
use crate::infra::metrics::{accuracy, SelectionReport};
use crate::ml::forest::{ForestConfig, RandomForest};
use crate::ml::model::{ClassifierArtifact, LogisticParams, SvmParams};

/// Fixed default hyperparameters, carried over from the source's
/// library defaults (tuning is out of scope).
const LOGISTIC_MAX_ITERATIONS: u64 = 100;
const FOREST_TREES: usize = 100;
const SVM_C: f64 = 1.0;

/// Run the full harness and return the winning classifier, the
/// fitted scaler, and the accuracy report for all three families.
pub fn train_and_select(
    records: &[LabeledRecord],
    split_ratio: f64,
    seed: u64,
) -> Result<(ClassifierArtifact, ScalerParams, SelectionReport)> {
    if records.is_empty() {
        return Err(CardioError::InsufficientData("no records loaded".into()).into());
    }
    if !has_both_classes(records) {
        return Err(CardioError::InsufficientData(
            "only one class label present; training and scoring are undefined".into(),
        )
        .into());
    }

    // ── Step 1: deterministic seeded split ────────────────────────────────
    let (train, test) = split_train_test(records.to_vec(), split_ratio, seed);
    if test.is_empty() {
        return Err(CardioError::InsufficientData(
            "test partition is empty; lower the split ratio or add records".into(),
        )
        .into());
    }
    if !has_both_classes(&train) {
        return Err(CardioError::InsufficientData(
            "training partition holds only one class after the split".into(),
        )
        .into());
    }
    tracing::info!("Split: {} train, {} test (seed {})", train.len(), test.len(), seed);

    let (x_train, y_train) = to_matrix(&train);
    let (x_test, y_test)   = to_matrix(&test);

    // ── Step 2: fit scaler on the training partition ONLY ─────────────────
    let scaler = ScalerParams::fit(&x_train);

    // ── Step 3: scale both partitions with the fitted params ──────────────
    let x_train_scaled = scaler.transform(&x_train)?;
    let x_test_scaled  = scaler.transform(&x_test)?;

    // ── Step 4: train the three families ──────────────────────────────────
    let logistic = fit_logistic(&x_train_scaled, &y_train)?;
    let forest   = fit_forest(&x_train_scaled, &y_train, seed);
    let svm      = fit_svm(&x_train_scaled, &y_train)?;

    // ── Step 5: score on the held-out partition ───────────────────────────
    let logistic_accuracy = score(&logistic, &x_test_scaled, &y_test);
    let forest_accuracy   = score(&forest, &x_test_scaled, &y_test);
    let svm_accuracy      = score(&svm, &x_test_scaled, &y_test);

    // ── Step 6: select, ties break toward the earlier family ──────────────
    let candidates = [
        (logistic_accuracy, logistic),
        (forest_accuracy, forest),
        (svm_accuracy, svm),
    ];
    let mut best: Option<(f64, ClassifierArtifact)> = None;
    for (acc, artifact) in candidates {
        if best.as_ref().map_or(true, |(best_acc, _)| acc > *best_acc) {
            best = Some((acc, artifact));
        }
    }
    let (_, selected) = best.expect("three candidates were scored");

    let report = SelectionReport {
        seed,
        split_ratio,
        n_train: train.len(),
        n_test:  test.len(),
        logistic_accuracy,
        forest_accuracy,
        svm_accuracy,
        selected: selected.kind(),
    };

    Ok((selected, scaler, report))
}

fn has_both_classes(records: &[LabeledRecord]) -> bool {
    records.iter().any(|r| r.label == 0) && records.iter().any(|r| r.label == 1)
}

/// Stack records into an (n × 13) matrix plus the label column.
fn to_matrix(records: &[LabeledRecord]) -> (Array2<f64>, Vec<u8>) {
    let mut x = Array2::zeros((records.len(), FEATURE_COUNT));
    let mut y = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        for (col, value) in record.features.as_slice().iter().enumerate() {
            x[[row, col]] = *value;
        }
        y.push(record.label);
    }
    (x, y)
}

/// Score an artifact on the scaled held-out partition using the
/// same decision functions that serve predictions.
fn score(artifact: &ClassifierArtifact, x_scaled: &Array2<f64>, y: &[u8]) -> f64 {
    let predicted: Vec<u8> = x_scaled
        .rows()
        .into_iter()
        .map(|row| artifact.predict(row.as_slice().expect("row is contiguous")))
        .collect();
    accuracy(&predicted, y)
}

/// Fit the logistic family with linfa and extract its weights.
fn fit_logistic(x_scaled: &Array2<f64>, y: &[u8]) -> Result<ClassifierArtifact> {
    let targets: Array1<usize> = y.iter().map(|&label| label as usize).collect();
    let dataset = Dataset::new(x_scaled.clone(), targets);

    let fitted = LogisticRegression::default()
        .max_iterations(LOGISTIC_MAX_ITERATIONS)
        .fit(&dataset)
        .context("logistic regression training failed")?;

    let mut weights: Vec<f64> = fitted.params().to_vec();
    let mut intercept: f64 = fitted.intercept();

    // linfa's binary fit chooses internally which class sits on the
    // positive side of the margin. Orient the extracted weights so
    // that a positive margin means label 1, by majority agreement
    // with the fitted model's own predictions.
    let linfa_preds = fitted.predict(x_scaled);
    let mut agree = 0usize;
    for (row, &pred) in x_scaled.rows().into_iter().zip(linfa_preds.iter()) {
        let z: f64 = row
            .iter()
            .zip(weights.iter())
            .map(|(v, w)| v * w)
            .sum::<f64>()
            + intercept;
        if (z > 0.0) == (pred == 1) {
            agree += 1;
        }
    }
    if agree * 2 < y.len() {
        weights.iter_mut().for_each(|w| *w = -*w);
        intercept = -intercept;
    }

    Ok(ClassifierArtifact::Logistic(LogisticParams { weights, intercept }))
}

/// Fit the ensemble-of-trees family, seeded from the run seed.
fn fit_forest(x_scaled: &Array2<f64>, y: &[u8], seed: u64) -> ClassifierArtifact {
    let config = ForestConfig {
        n_trees: FOREST_TREES,
        seed,
        ..ForestConfig::default()
    };
    ClassifierArtifact::Forest(RandomForest::fit(x_scaled, y, &config))
}

/// Fit the margin-based family with linfa-svm (RBF kernel) and
/// extract its dual coefficients for serving.
fn fit_svm(x_scaled: &Array2<f64>, y: &[u8]) -> Result<ClassifierArtifact> {
    // Kernel width in linfa's Gaussian(eps) convention, chosen the
    // way the source's library scales it: eps = n_features × mean
    // column variance of the (already standardized) training data.
    let n = x_scaled.nrows() as f64;
    let mean_variance: f64 = (0..x_scaled.ncols())
        .map(|col| {
            let column = x_scaled.column(col);
            let mean = column.sum() / n;
            column.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n
        })
        .sum::<f64>()
        / x_scaled.ncols() as f64;
    let eps = (x_scaled.ncols() as f64 * mean_variance).max(f64::EPSILON);

    let targets: Array1<bool> = y.iter().map(|&label| label == 1).collect();
    let dataset = Dataset::new(x_scaled.clone(), targets);

    let fitted = Svm::<f64, bool>::params()
        .pos_neg_weights(SVM_C, SVM_C)
        .gaussian_kernel(eps)
        .fit(&dataset)
        .context("SVM training failed")?;

    let mut alpha: Vec<f64> = fitted.alpha.clone();
    let mut rho: f64 = fitted.rho;
    let support_vectors: Vec<Vec<f64>> = x_scaled
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();

    // Same orientation question as the logistic fit: make sure a
    // positive decision value means label 1.
    let kernel = |a: &[f64], b: &[f64]| -> f64 {
        let sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
        (-sq / eps).exp()
    };
    let linfa_preds = fitted.predict(x_scaled);
    let mut agree = 0usize;
    for (row, &pred) in x_scaled.rows().into_iter().zip(linfa_preds.iter()) {
        let row = row.as_slice().expect("row is contiguous");
        let decision: f64 = alpha
            .iter()
            .zip(support_vectors.iter())
            .map(|(a, sv)| a * kernel(row, sv))
            .sum::<f64>()
            - rho;
        if (decision > 0.0) == pred {
            agree += 1;
        }
    }
    if agree * 2 < y.len() {
        alpha.iter_mut().for_each(|a| *a = -*a);
        rho = -rho;
    }

    Ok(ClassifierArtifact::Svm(SvmParams { alpha, support_vectors, rho, eps }))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::FEATURE_COUNT;
    use crate::ml::model::ModelKind;

    /// A trivially separable dataset: every feature splits the two
    /// classes at zero, with small jitter so no column is constant.
    fn separable_records(n: usize) -> Vec<LabeledRecord> {
        (0..n)
            .map(|i| {
                let label = u8::from(i % 2 == 1);
                let mut features = [0.0f64; FEATURE_COUNT];
                let center = if label == 1 { 10.0 } else { -10.0 };
                for (col, slot) in features.iter_mut().enumerate() {
                    *slot = center + ((i + col) % 5) as f64 * 0.01;
                }
                LabeledRecord::new(features, label)
            })
            .collect()
    }

    #[test]
    fn test_empty_input_is_insufficient() {
        let err = train_and_select(&[], 0.8, 42).unwrap_err();
        let cardio = err.downcast_ref::<CardioError>().unwrap();
        assert!(matches!(cardio, CardioError::InsufficientData(_)));
    }

    #[test]
    fn test_single_class_is_insufficient() {
        let records: Vec<LabeledRecord> = (0..20)
            .map(|i| LabeledRecord::new([i as f64; FEATURE_COUNT], 1))
            .collect();
        let err = train_and_select(&records, 0.8, 42).unwrap_err();
        let cardio = err.downcast_ref::<CardioError>().unwrap();
        assert!(matches!(cardio, CardioError::InsufficientData(_)));
    }

    #[test]
    fn test_returns_one_of_the_three_kinds() {
        let records = separable_records(60);
        let (artifact, scaler, report) = train_and_select(&records, 0.8, 42).unwrap();

        assert!(matches!(
            artifact.kind(),
            ModelKind::Logistic | ModelKind::Forest | ModelKind::Svm
        ));
        assert_eq!(scaler.mean.len(), FEATURE_COUNT);
        assert_eq!(report.n_train + report.n_test, 60);
        assert_eq!(report.seed, 42);
    }

    #[test]
    fn test_tie_breaks_toward_logistic() {
        // Trivially separable: all three families reach 100% on the
        // held-out split, so the fixed priority must pick logistic.
        let records = separable_records(80);
        let (artifact, _, report) = train_and_select(&records, 0.8, 42).unwrap();

        assert_eq!(report.logistic_accuracy, 1.0);
        assert_eq!(report.forest_accuracy, 1.0);
        assert_eq!(report.svm_accuracy, 1.0);
        assert_eq!(artifact.kind(), ModelKind::Logistic);
        assert_eq!(report.selected, ModelKind::Logistic);
    }

    #[test]
    fn test_same_seed_reproduces_the_report() {
        let records = separable_records(60);
        let (_, _, report_a) = train_and_select(&records, 0.8, 7).unwrap();
        let (_, _, report_b) = train_and_select(&records, 0.8, 7).unwrap();

        assert_eq!(report_a.n_train, report_b.n_train);
        assert_eq!(report_a.logistic_accuracy, report_b.logistic_accuracy);
        assert_eq!(report_a.forest_accuracy, report_b.forest_accuracy);
        assert_eq!(report_a.svm_accuracy, report_b.svm_accuracy);
        assert_eq!(report_a.selected, report_b.selected);
    }
}
