// ============================================================
// Layer 5 — Classifier Artifact
// ============================================================
// The opaque trained-model parameters the Artifact Store persists:
// exactly one of the three families, as plain serializable data.
//
// Serving never calls back into the training crates — each family
// carries its own decision function over the stored parameters:
//
//   logistic: σ(w·x + b) ≥ 0.5
//   forest:   majority vote over the stored trees
//   svm:      Σ αᵢ·k(x, xᵢ) − rho > 0,  k(x,y) = exp(−‖x−y‖²/eps)
//
// The SVM kernel here must match the kernel used at fit time
// (linfa's Gaussian(eps) convention) — a different kernel at
// serving time is train/serve skew.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ml::forest::RandomForest;

/// Which classifier family an artifact belongs to, in selection
/// priority order (ties break toward the smaller variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    Logistic,
    Forest,
    Svm,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Logistic => write!(f, "Logistic Regression"),
            ModelKind::Forest   => write!(f, "Random Forest"),
            ModelKind::Svm      => write!(f, "SVM"),
        }
    }
}

/// Parameters of a fitted logistic model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticParams {
    pub weights:   Vec<f64>,
    pub intercept: f64,
}

impl LogisticParams {
    /// Decision function: σ(w·x + b), thresholded at 0.5.
    fn predict(&self, x: &[f64]) -> u8 {
        let z: f64 = self
            .weights
            .iter()
            .zip(x.iter())
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        let sigma = 1.0 / (1.0 + (-z).exp());
        u8::from(sigma >= 0.5)
    }
}

/// Parameters of a fitted RBF-kernel SVM: the dual coefficients
/// paired row-for-row with the scaled training matrix, plus the
/// bias and kernel width extracted from the fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmParams {
    pub alpha:           Vec<f64>,
    pub support_vectors: Vec<Vec<f64>>,
    pub rho:             f64,
    pub eps:             f64,
}

impl SvmParams {
    /// RBF kernel in linfa's Gaussian(eps) convention.
    fn kernel(&self, a: &[f64], b: &[f64]) -> f64 {
        let sq_dist: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum();
        (-sq_dist / self.eps).exp()
    }

    /// Decision function: Σ αᵢ·k(x, xᵢ) − rho, positive → class 1.
    fn predict(&self, x: &[f64]) -> u8 {
        let sum: f64 = self
            .alpha
            .iter()
            .zip(self.support_vectors.iter())
            .map(|(alpha_i, sv)| alpha_i * self.kernel(x, sv))
            .sum();
        u8::from(sum - self.rho > 0.0)
    }
}

/// The one persisted classifier: exactly one family's parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClassifierArtifact {
    Logistic(LogisticParams),
    Forest(RandomForest),
    Svm(SvmParams),
}

impl ClassifierArtifact {
    pub fn kind(&self) -> ModelKind {
        match self {
            ClassifierArtifact::Logistic(_) => ModelKind::Logistic,
            ClassifierArtifact::Forest(_)   => ModelKind::Forest,
            ClassifierArtifact::Svm(_)      => ModelKind::Svm,
        }
    }

    /// Predict the binary verdict for one SCALED feature vector.
    /// The caller is responsible for scaling — this is the last
    /// step of the pipeline, not the whole pipeline.
    pub fn predict(&self, scaled: &[f64]) -> u8 {
        match self {
            ClassifierArtifact::Logistic(p) => p.predict(scaled),
            ClassifierArtifact::Forest(f)   => f.predict(scaled),
            ClassifierArtifact::Svm(p)      => p.predict(scaled),
        }
    }
}
