//! # Graph Loader Shared
//!
//! Plain data types passed between the graph loader crates: the load
//! manifest, raw CSV rows, the typed records projected from them, and the
//! summary of a finished run.

mod manifest;
mod records;
mod summary;

pub use manifest::{Manifest, RelationSpec, RelationSpecError};
pub use records::{EntityRecord, FieldSet, RawRow, Record, RelationRecord};
pub use summary::LoadSummary;
