//! Loader module for the graph loader pipeline.
//!
//! Ensures lookup indexes and writes batches of records into the graph.

mod bulk_writer;
mod index_manager;

pub use bulk_writer::{entity_statement, relation_statement, BulkWriter, CREATED_COLUMN};
pub use index_manager::IndexManager;
