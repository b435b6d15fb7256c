// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Single-record serving. Steps, in this exact order:
//
//   1. encode every raw slot through the Feature Schema —
//      an unset slot fails here, BEFORE any numeric work,
//      since a missing categorical maps to no valid code
//   2. assemble the 13-value FeatureVector in canonical order
//   3. apply the persisted ScalerParams (the same `apply` the
//      harness used on the test partition)
//   4. invoke the persisted classifier and return its 0/1
//      verdict unchanged — no thresholding or calibration on top

use anyhow::Result;

use crate::data::scaler::ScalerParams;
use crate::domain::record::FeatureVector;
use crate::domain::schema::{encode, RawValue, FEATURE_COUNT, FEATURE_NAMES};
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::model::ClassifierArtifact;

pub struct Inferencer {
    scaler: ScalerParams,
    model:  ClassifierArtifact,
}

impl Inferencer {
    /// Build directly from a training run's outputs.
    pub fn new(scaler: ScalerParams, model: ClassifierArtifact) -> Self {
        Self { scaler, model }
    }

    /// Load the persisted bundle — scaler and classifier from the
    /// same run, by construction of the store.
    pub fn from_store(store: &ArtifactStore) -> Result<Self> {
        let bundle = store.load()?;
        tracing::info!("Loaded {} artifact from store", bundle.model.kind());
        Ok(Self::new(bundle.scaler, bundle.model))
    }

    /// Predict the binary verdict for one raw input record.
    /// 0 = low risk, 1 = high risk.
    pub fn predict(&self, raw: &[RawValue; FEATURE_COUNT]) -> Result<u8> {
        // Encode all 13 slots first; any unset or invalid slot
        // fails the whole record before the model is touched.
        let mut values = [0.0f64; FEATURE_COUNT];
        for (idx, slot) in raw.iter().enumerate() {
            values[idx] = encode(FEATURE_NAMES[idx], slot)?;
        }
        let vector = FeatureVector(values);

        let scaled  = self.scaler.apply(&vector)?;
        let verdict = self.model.predict(&scaled);

        tracing::debug!("Prediction: {} ({})", verdict, self.model.kind());
        Ok(verdict)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CardioError;
    use crate::domain::record::LabeledRecord;
    use crate::ml::model::LogisticParams;
    use crate::ml::trainer::train_and_select;

    /// The worked example from the intake form: a 63-year-old male
    /// with typical angina. Must encode to
    /// [63,1,1,145,233,1,2,150,0,2.3,3,0,6] before scaling.
    fn sample_raw() -> [RawValue; FEATURE_COUNT] {
        [
            RawValue::Number(63.0),
            RawValue::Label("Male".into()),
            RawValue::Label("Typical Angina".into()),
            RawValue::Number(145.0),
            RawValue::Number(233.0),
            RawValue::Label("Yes".into()),
            RawValue::Label("Left Ventricular Hypertrophy".into()),
            RawValue::Number(150.0),
            RawValue::Label("No".into()),
            RawValue::Number(2.3),
            RawValue::Label("Downsloping".into()),
            RawValue::Number(0.0),
            RawValue::Label("Fixed Defect".into()),
        ]
    }

    /// Identity scaler + a logistic model whose verdict only
    /// depends on the first feature's sign.
    fn identity_inferencer() -> Inferencer {
        let scaler = ScalerParams {
            mean: vec![0.0; FEATURE_COUNT],
            std:  vec![1.0; FEATURE_COUNT],
        };
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[0] = 1.0;
        let model = ClassifierArtifact::Logistic(LogisticParams { weights, intercept: 0.0 });
        Inferencer::new(scaler, model)
    }

    #[test]
    fn test_worked_example_encodes_to_expected_vector() {
        let raw = sample_raw();
        let mut values = [0.0f64; FEATURE_COUNT];
        for (idx, slot) in raw.iter().enumerate() {
            values[idx] = encode(FEATURE_NAMES[idx], slot).unwrap();
        }
        assert_eq!(
            values,
            [63.0, 1.0, 1.0, 145.0, 233.0, 1.0, 2.0, 150.0, 0.0, 2.3, 3.0, 0.0, 6.0],
        );
    }

    #[test]
    fn test_unset_thal_fails_before_the_scaler() {
        // Scaler with a poisoned std: if the pipeline ever reached
        // apply, it would fail with DegenerateFeature instead of
        // the expected IncompleteInput.
        let scaler = ScalerParams {
            mean: vec![0.0; FEATURE_COUNT],
            std:  vec![0.0; FEATURE_COUNT],
        };
        let model = ClassifierArtifact::Logistic(LogisticParams {
            weights:   vec![0.0; FEATURE_COUNT],
            intercept: 0.0,
        });
        let inferencer = Inferencer::new(scaler, model);

        let mut raw = sample_raw();
        raw[12] = RawValue::Unset; // thal never selected

        let err = inferencer.predict(&raw).unwrap_err();
        let cardio = err.downcast_ref::<CardioError>().unwrap();
        assert!(matches!(cardio, CardioError::IncompleteInput { feature: "thal" }));
    }

    #[test]
    fn test_unknown_label_propagates() {
        let inferencer = identity_inferencer();
        let mut raw = sample_raw();
        raw[2] = RawValue::Label("Crushing".into());

        let err = inferencer.predict(&raw).unwrap_err();
        let cardio = err.downcast_ref::<CardioError>().unwrap();
        assert!(matches!(cardio, CardioError::UnknownCategory { feature: "cp", .. }));
    }

    #[test]
    fn test_verdict_is_binary() {
        let inferencer = identity_inferencer();
        let verdict = inferencer.predict(&sample_raw()).unwrap();
        assert!(verdict == 0 || verdict == 1);
        // age 63 with weight 1 on the first feature → high risk
        assert_eq!(verdict, 1);
    }

    #[test]
    fn test_end_to_end_train_then_serve() {
        // Train on synthetic records whose label follows oldpeak
        // (feature 9), then serve the worked example through the
        // full encode → scale → predict path.
        let records: Vec<LabeledRecord> = (0..80)
            .map(|i| {
                let label = u8::from(i % 2 == 1);
                let mut features = [0.0f64; FEATURE_COUNT];
                features[9] = if label == 1 { 8.0 } else { 0.5 };
                // Label-independent variation so only oldpeak carries signal
                features[0] = 40.0 + ((i / 2) % 30) as f64;
                features[3] = 120.0 + ((i / 2) % 40) as f64;
                LabeledRecord::new(features, label)
            })
            .collect();

        let (model, scaler, _) = train_and_select(&records, 0.8, 42).unwrap();
        let inferencer = Inferencer::new(scaler, model);

        let mut low = sample_raw();
        low[9] = RawValue::Number(0.5);
        assert_eq!(inferencer.predict(&low).unwrap(), 0);

        let mut high = sample_raw();
        high[9] = RawValue::Number(8.0);
        assert_eq!(inferencer.predict(&high).unwrap(), 1);
    }
}
