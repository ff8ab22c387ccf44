//! Snapshot documents.
//!
//! Transaction snapshots travel between parties as YAML or JSON. This
//! module loads them, validating against the embedded JSON Schema first.

mod parser;
mod schema;

pub use parser::SnapshotError;
pub use schema::validate_snapshot_schema;
