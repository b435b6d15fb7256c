// ============================================================
// Layer 3 — Feature Schema
// ============================================================
// The fixed, ordered list of the 13 clinical features, and for
// the seven categorical ones a single explicit label → code table.
//
// Two things are sacred here:
//   1. FEATURE_NAMES order — the model was trained on columns in
//      exactly this order. Reordering silently mislabels features
//      and corrupts every prediction without raising an error.
//   2. The integer codes — they must be identical to the codes
//      already present in the historical training table. They are
//      not chosen here, they mirror the table.
//
// The original program spread these lookups across per-field UI
// code, coupled positionally to an index. Collecting them into one
// table keyed by feature name, validated against the declared
// order, removes that fragile coupling.

use crate::domain::errors::CardioError;

/// Number of clinical input features.
pub const FEATURE_COUNT: usize = 13;

/// Canonical feature order — identical to the training table columns.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg",
    "thalach", "exang", "oldpeak", "slope", "ca", "thal",
];

/// Label → code table for every categorical feature.
/// The codes mirror the historical table's encoding exactly.
const CATEGORY_MAPS: [(&str, &[(&str, f64)]); 7] = [
    ("sex",     &[("Male", 1.0), ("Female", 0.0)]),
    ("cp",      &[
        ("Typical Angina", 1.0),
        ("Atypical Angina", 2.0),
        ("Non-Anginal", 3.0),
        ("Asymptomatic", 4.0),
    ]),
    ("fbs",     &[("Yes", 1.0), ("No", 0.0)]),
    ("restecg", &[
        ("Normal", 0.0),
        ("ST-T Abnormality", 1.0),
        ("Left Ventricular Hypertrophy", 2.0),
    ]),
    ("exang",   &[("Yes", 1.0), ("No", 0.0)]),
    ("slope",   &[("Upsloping", 1.0), ("Flat", 2.0), ("Downsloping", 3.0)]),
    ("thal",    &[("Normal", 3.0), ("Fixed Defect", 6.0), ("Reversible Defect", 7.0)]),
];

/// Plausible ranges for the numeric features, taken from the
/// intake form's input bounds.
const NUMERIC_RANGES: [(&str, f64, f64); 6] = [
    ("age",      1.0, 120.0),
    ("trestbps", 50.0, 300.0),
    ("chol",     100.0, 600.0),
    ("thalach",  60.0, 250.0),
    ("oldpeak",  0.0, 10.0),
    ("ca",       0.0, 3.0),
];

/// One raw input slot as produced by the intake form:
/// either still unset, a categorical label, or a plain number.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// The form slot was never filled in.
    Unset,
    /// A categorical answer, e.g. "Typical Angina".
    Label(String),
    /// A numeric answer, e.g. 145.0.
    Number(f64),
}

/// Look up the category table for a feature, if it is categorical.
pub fn category_map(feature: &str) -> Option<&'static [(&'static str, f64)]> {
    CATEGORY_MAPS
        .iter()
        .find(|(name, _)| *name == feature)
        .map(|(_, map)| *map)
}

/// Look up the plausibility range for a feature, if it is numeric.
fn numeric_range(feature: &str) -> Option<(f64, f64)> {
    NUMERIC_RANGES
        .iter()
        .find(|(name, _, _)| *name == feature)
        .map(|(_, min, max)| (*min, *max))
}

/// Encode one raw input slot into the numeric value the model was
/// trained on.
///
/// Rules, checked in this order:
///   - `Unset` fails with `IncompleteInput` before any numeric work
///   - categorical features require a label from the closed set;
///     anything else is `UnknownCategory`
///   - numeric features pass through unchanged after a range check
///
/// Pure function: same input, same output, no side effects.
pub fn encode(feature: &'static str, raw: &RawValue) -> Result<f64, CardioError> {
    let raw = match raw {
        RawValue::Unset => return Err(CardioError::IncompleteInput { feature }),
        other => other,
    };

    if let Some(map) = category_map(feature) {
        let label = match raw {
            RawValue::Label(label) => label.as_str(),
            // A bare number in a categorical slot is not a valid label
            RawValue::Number(n) => {
                return Err(CardioError::UnknownCategory {
                    feature,
                    label: n.to_string(),
                })
            }
            RawValue::Unset => unreachable!(),
        };
        return map
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, code)| *code)
            .ok_or_else(|| CardioError::UnknownCategory {
                feature,
                label: label.to_string(),
            });
    }

    // Numeric feature: type check, then plausibility range check
    let value = match raw {
        RawValue::Number(n) => *n,
        RawValue::Label(label) => {
            return Err(CardioError::UnknownCategory {
                feature,
                label: label.clone(),
            })
        }
        RawValue::Unset => unreachable!(),
    };

    if let Some((min, max)) = numeric_range(feature) {
        if value < min || value > max {
            return Err(CardioError::InvalidRange { feature, value, min, max });
        }
    }

    Ok(value)
}

/// Check the category table against the declared feature order.
///
/// Every categorical entry must name a schema feature, and the
/// table must be keyed by name only — this is what replaced the
/// source's positional coupling, so it is verified, not assumed.
pub fn validate() -> Result<(), String> {
    for (name, map) in &CATEGORY_MAPS {
        if !FEATURE_NAMES.contains(name) {
            return Err(format!("category map entry '{name}' is not a schema feature"));
        }
        if map.is_empty() {
            return Err(format!("category map for '{name}' is empty"));
        }
    }
    for (name, _, _) in &NUMERIC_RANGES {
        if !FEATURE_NAMES.contains(name) {
            return Err(format!("numeric range entry '{name}' is not a schema feature"));
        }
        if category_map(name).is_some() {
            return Err(format!("feature '{name}' has both a range and a category map"));
        }
    }
    Ok(())
}
