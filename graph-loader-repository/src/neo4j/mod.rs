//! Neo4j implementation of the graph backend.
//!
//! This module provides a concrete implementation of `GraphBackend`
//! using `neo4rs` over Bolt.

mod client;

pub use client::Neo4jClient;
