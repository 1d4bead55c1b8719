//! Processor module for the graph loader pipeline.
//!
//! Projects raw CSV rows into entity and relation records.

mod row_projector;

pub use row_projector::{
    entity_field_set, project_entity_row, project_relation_row, END_ID_COLUMN, START_ID_COLUMN,
};
