//! Error types for the graph loader pipeline.

use std::path::PathBuf;

use graph_loader_repository::GraphError;
use graph_loader_shared::FieldSet;
use thiserror::Error;

/// Errors that can occur in the graph loader pipeline.
///
/// Every variant is fatal to the run: the orchestrator stops at the first
/// error and leaves already written batches in the backend.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The data directory has no manifest file.
    #[error("Cannot find manifest '{}'", path.display())]
    MissingManifest { path: PathBuf },

    /// The manifest exists but cannot be understood.
    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    /// Batch size must be a positive integer.
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(i64),

    /// A relation row lacks one of its endpoint columns.
    #[error("Relation row is missing column '{column}'")]
    MissingRelationEndpoint { column: String },

    /// An entity file has no column for the identifier property.
    #[error("Entity file '{}' for type '{entity_type}' has no '{property}' column", path.display())]
    MissingIdColumn {
        entity_type: String,
        property: String,
        path: PathBuf,
    },

    /// A record does not carry the fields the batch was started with.
    #[error("Field set changed within one file: expected {expected}, found {found}")]
    FieldSetDrift { expected: FieldSet, found: FieldSet },

    /// The backend could not be reached or reported itself unhealthy.
    #[error("Graph backend unavailable: {0}")]
    BackendUnavailable(#[source] GraphError),

    /// Wiping the database failed.
    #[error("Failed to delete existing data: {0}")]
    WipeFailed(#[source] GraphError),

    /// The backend refused to create an index.
    #[error("Failed to create index: {0}")]
    IndexCreationFailed(#[source] GraphError),

    /// A bulk write failed.
    #[error("Write failed: {0}")]
    WriteFailed(#[source] GraphError),

    /// Some relation endpoints did not resolve to existing nodes.
    #[error("Relation '{relation}' created {created} of {expected} edges; unresolved endpoint ids")]
    DanglingEndpoint {
        relation: String,
        expected: usize,
        created: i64,
    },

    /// Reading or parsing a CSV file failed.
    #[error("CSV error in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Reading a file failed.
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Create a malformed manifest error.
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::MalformedManifest(msg.into())
    }

    /// Create a missing relation endpoint error.
    pub fn missing_endpoint(column: impl Into<String>) -> Self {
        Self::MissingRelationEndpoint {
            column: column.into(),
        }
    }

    /// Create a CSV error for `path`.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
