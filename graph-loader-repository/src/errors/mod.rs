//! Error types for the graph loader repository.

mod graph_error;

pub use graph_error::GraphError;
