// ============================================================
// Layer 2 — Application Layer
// ============================================================
// Use cases that orchestrate the lower layers. The CLI calls in
// here; this layer calls down into data, ml and infra. It never
// sees clap types and never formats user-facing text.

// The offline training & selection batch job
pub mod train_use_case;

// Single-record serving against the persisted artifact
pub mod predict_use_case;
