//! Row projection.
//!
//! Headers are decorated as `name[:type]`. The bare name before the first
//! `:` becomes the record key; headers with an empty bare name (`:LABEL`,
//! `:TYPE`) are dropped. Values are passed through as raw strings.

use crate::errors::PipelineError;
use graph_loader_shared::{EntityRecord, FieldSet, RawRow, RelationRecord};

/// Reserved column holding the start node id of an edge.
pub const START_ID_COLUMN: &str = ":START_ID";

/// Reserved column holding the end node id of an edge.
pub const END_ID_COLUMN: &str = ":END_ID";

/// Bare name of a decorated header, or `None` if it has none.
fn bare_name(header: &str) -> Option<&str> {
    let name = header.split_once(':').map_or(header, |(name, _)| name);
    (!name.is_empty()).then_some(name)
}

/// Field set produced by projecting rows with these headers.
pub fn entity_field_set<'a>(headers: impl IntoIterator<Item = &'a str>) -> FieldSet {
    let mut names: Vec<String> = Vec::new();
    for name in headers.into_iter().filter_map(bare_name) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    FieldSet::new(names)
}

/// Convert one raw row into an entity record.
pub fn project_entity_row(row: &RawRow) -> EntityRecord {
    row.iter()
        .filter_map(|(header, value)| bare_name(header).map(|name| (name, value)))
        .collect()
}

/// Convert one raw row into a relation record.
///
/// Only `:START_ID` and `:END_ID` are read; other columns are ignored.
pub fn project_relation_row(row: &RawRow) -> Result<RelationRecord, PipelineError> {
    let start_id = row
        .get(START_ID_COLUMN)
        .ok_or_else(|| PipelineError::missing_endpoint(START_ID_COLUMN))?;
    let end_id = row
        .get(END_ID_COLUMN)
        .ok_or_else(|| PipelineError::missing_endpoint(END_ID_COLUMN))?;

    Ok(RelationRecord::new(start_id, end_id))
}
