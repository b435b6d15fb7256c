// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs,
// enums and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO ML-crate types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no model, no disk needed)
//   - The encoding rules live in exactly one place, so the
//     training table and the serving input can never drift apart
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The 13-feature schema: canonical order, category maps, ranges
pub mod schema;

// Feature vectors and labeled training records
pub mod record;

// The error taxonomy shared by every layer
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
