// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types, the
// application layer can swap implementations without changes.
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::record::LabeledRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load the historical labeled table.
///
/// Implementations:
///   - CsvLoader → reads the 14-column pre-encoded CSV table
///   - (future) DbLoader → reads from a clinical database
pub trait RecordSource {
    /// Load every labeled record from this source.
    fn load_all(&self) -> Result<Vec<LabeledRecord>>;
}
