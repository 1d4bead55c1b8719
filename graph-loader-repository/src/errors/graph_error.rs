//! Graph backend error types.
//!
//! This module defines the error types that can occur while talking to the
//! graph database.

use thiserror::Error;

/// Errors that can occur during graph backend operations.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    /// Failed to establish connection to the graph database.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The `user:password` credentials could not be parsed.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Statement execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to create an index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to read a value back from a result row.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl GraphError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an invalid credentials error.
    pub fn invalid_credentials(msg: impl Into<String>) -> Self {
        Self::InvalidCredentials(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
