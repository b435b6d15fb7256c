// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw CSV table
// all the way to the scaled matrices the trainers consume.
//
// The pipeline flows in this order:
//
//   heart.csv (14 pre-encoded columns)
//       │
//       ▼
//   CsvLoader         → reads rows, validates the header order
//       │
//       ▼
//   split_train_test  → seeded shuffle, 80/20 partition
//       │
//       ▼
//   ScalerParams      → fitted on the training partition ONLY,
//                       then applied to both partitions and,
//                       much later, to every serving input
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.

// Reads the historical table from CSV
pub mod loader;

// Seeded train/test partitioning
pub mod splitter;

// Standardization: fit on train, apply everywhere
pub mod scaler;
