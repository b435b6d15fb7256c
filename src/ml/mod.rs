// ============================================================
// Layer 5 — Machine Learning
// ============================================================
// Training and serving of the three classifier families:
//
//   logistic     → fitted with linfa-logistic
//   forest       → bagged CART trees, fitted in-crate
//   margin (SVM) → fitted with linfa-svm, RBF kernel
//
// Whatever crate does the fitting, the PERSISTED artifact is a
// plain parameter struct owned by this crate (weights, tree nodes,
// support vectors), and serving runs our own decision functions on
// those parameters. One artifact format, no ML-crate types on disk.

// The serialized artifact and its decision functions
pub mod model;

// The ensemble-of-trees family
pub mod forest;

// The training & selection harness
pub mod trainer;

// Single-record serving: encode → scale → predict
pub mod inferencer;
