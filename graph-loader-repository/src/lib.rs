//! # Graph Loader Repository
//!
//! This crate provides the backend side of the graph loader: the
//! `GraphBackend` trait the ingestion engine writes through, its error
//! type, Cypher helpers, and a concrete implementation for Neo4j.

pub mod config;
pub mod cypher;
pub mod errors;
pub mod interfaces;
pub mod neo4j;

pub use config::{Credentials, Neo4jConfig};
pub use errors::GraphError;
pub use interfaces::{GraphBackend, ParamRow, Statement};
pub use neo4j::Neo4jClient;
