// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `predict`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for malformed args
//   - type conversion (string → f64, u64, etc.)
//
// Every patient flag on `predict` is optional on purpose: a
// missing flag becomes the unset sentinel, and the PIPELINE —
// not clap — rejects it as incomplete. This keeps the boundary
// identical to the interactive form, where a slot can stay on
// "Select" until submitted.

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::domain::schema::{RawValue, FEATURE_COUNT};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the three classifiers and persist the best one
    Train(TrainArgs),

    /// Predict heart-disease risk for one patient record
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the historical table (14 pre-encoded columns)
    #[arg(long, default_value = "heart.csv")]
    pub data: String,

    /// Directory for the model/scaler bundle and the report
    #[arg(long, default_value = "artifacts")]
    pub artifact_dir: String,

    /// Fraction of records used for training (rest is held out)
    #[arg(long, default_value_t = 0.8)]
    pub split_ratio: f64,

    /// Seed for the train/test shuffle, recorded in the report
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:    a.data,
            artifact_dir: a.artifact_dir,
            split_ratio:  a.split_ratio,
            seed:         a.seed,
        }
    }
}

/// All arguments for the `predict` command — one flag per
/// clinical feature, in the schema's canonical order.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Directory where a prior `train` run saved its artifacts
    #[arg(long, default_value = "artifacts")]
    pub artifact_dir: String,

    /// Age in years (1-120)
    #[arg(long)]
    pub age: Option<f64>,

    /// Gender: Male or Female
    #[arg(long)]
    pub sex: Option<String>,

    /// Chest pain type: "Typical Angina", "Atypical Angina",
    /// "Non-Anginal" or "Asymptomatic"
    #[arg(long)]
    pub cp: Option<String>,

    /// Resting blood pressure in mmHg (50-300)
    #[arg(long)]
    pub trestbps: Option<f64>,

    /// Serum cholesterol in mg/dl (100-600)
    #[arg(long)]
    pub chol: Option<f64>,

    /// Fasting blood sugar > 120 mg/dl: Yes or No
    #[arg(long)]
    pub fbs: Option<String>,

    /// Resting ECG: "Normal", "ST-T Abnormality" or
    /// "Left Ventricular Hypertrophy"
    #[arg(long)]
    pub restecg: Option<String>,

    /// Maximum heart rate achieved (60-250)
    #[arg(long)]
    pub thalach: Option<f64>,

    /// Exercise induced angina: Yes or No
    #[arg(long)]
    pub exang: Option<String>,

    /// ST depression induced by exercise (0.0-10.0)
    #[arg(long)]
    pub oldpeak: Option<f64>,

    /// Slope of peak exercise ST segment: "Upsloping", "Flat" or
    /// "Downsloping"
    #[arg(long)]
    pub slope: Option<String>,

    /// Number of major vessels colored by fluoroscopy (0-3)
    #[arg(long)]
    pub ca: Option<f64>,

    /// Thalassemia: "Normal", "Fixed Defect" or "Reversible Defect"
    #[arg(long)]
    pub thal: Option<String>,
}

fn number(value: &Option<f64>) -> RawValue {
    value.map_or(RawValue::Unset, RawValue::Number)
}

fn label(value: &Option<String>) -> RawValue {
    value
        .as_ref()
        .map_or(RawValue::Unset, |l| RawValue::Label(l.clone()))
}

impl PredictArgs {
    /// Assemble the raw input record in canonical schema order.
    /// Missing flags become the unset sentinel; the pipeline
    /// decides what that means.
    pub fn to_raw(&self) -> [RawValue; FEATURE_COUNT] {
        [
            number(&self.age),
            label(&self.sex),
            label(&self.cp),
            number(&self.trestbps),
            number(&self.chol),
            label(&self.fbs),
            label(&self.restecg),
            number(&self.thalach),
            label(&self.exang),
            number(&self.oldpeak),
            label(&self.slope),
            number(&self.ca),
            label(&self.thal),
        ]
    }
}
