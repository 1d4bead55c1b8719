//! Interface definitions for the graph backend.
//!
//! This module defines the abstract `GraphBackend` trait that allows for
//! dependency injection and swappable backend implementations.

mod graph_backend;

pub use graph_backend::{GraphBackend, ParamRow, Statement};
