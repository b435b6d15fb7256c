// ============================================================
// Layer 6 — Infrastructure
// ============================================================
// The only layer that touches the filesystem. Two concerns:
//
//   - ArtifactStore: the single slot holding the fitted scaler
//     and the selected classifier, written atomically so a reader
//     can never pair a scaler from one run with a model from
//     another
//   - metrics: accuracy scoring and the per-run selection report

// Atomic save/load of the model+scaler bundle
pub mod artifact_store;

// Accuracy metric and the selection report
pub mod metrics;
