//! # Graph Loader Pipeline
//!
//! This crate provides the batch ingestion engine that bulk-loads typed
//! entities and relations described by CSV files and a manifest into a
//! graph database.
//!
//! ## Architecture
//!
//! The pipeline follows the Consumer-Processor-Loader pattern:
//!
//! 1. **Manifest**: Reads `metadata.json` from the data directory
//! 2. **Consumer**: Streams raw rows out of one CSV file at a time
//! 3. **Processor**: Projects raw rows into entity and relation records
//! 4. **Batch**: Groups records into bounded batches
//! 5. **Loader**: Ensures indexes and writes batches through the backend
//! 6. **Orchestrator**: Sequences the phases of a run

pub mod batch;
pub mod config;
pub mod consumer;
pub mod errors;
pub mod loader;
pub mod manifest;
pub mod orchestrator;
pub mod processor;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::LoaderConfig;
pub use errors::PipelineError;
pub use orchestrator::{LoadState, Orchestrator};
