//! Graph backend trait definition.
//!
//! This module defines the abstract interface the ingestion engine writes
//! through, allowing for different backend implementations (Neo4j, mock, etc.).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::GraphError;
use graph_loader_shared::Record;

/// One element of the bound parameter list of a bulk statement.
pub type ParamRow = HashMap<String, String>;

/// A parameterized statement together with the rows bound to it.
///
/// The rows are bound under the parameter name [`Statement::VALUES_PARAM`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Statement text with a `$values` placeholder.
    pub text: String,
    /// Rows bound as `$values`.
    pub values: Vec<ParamRow>,
    /// Column of the first result row to report back, if any.
    pub returns: Option<String>,
}

impl Statement {
    /// Name of the parameter the rows are bound to.
    pub const VALUES_PARAM: &'static str = "values";

    /// Create a statement with no bound rows.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            values: Vec::new(),
            returns: None,
        }
    }

    /// Bind `records` as the `$values` list.
    pub fn with_records<R: Record>(mut self, records: &[R]) -> Self {
        self.values = records.iter().map(Record::to_param_row).collect();
        self
    }

    /// Ask the backend to report `column` of the first result row.
    pub fn returning(mut self, column: impl Into<String>) -> Self {
        self.returns = Some(column.into());
        self
    }
}

/// Abstract interface for graph database operations.
///
/// Every call is one backend transaction; there is no atomicity across calls.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`, although the loader only ever
/// issues one call at a time.
#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// Execute a statement with its bound rows.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(n))` - The value of `statement.returns` in the first result row
    /// * `Ok(None)` - If the statement asked for no column
    /// * `Err(GraphError)` - If execution fails
    async fn run(&self, statement: &Statement) -> Result<Option<i64>, GraphError>;

    /// Delete every node and relationship in the database.
    async fn delete_all(&self) -> Result<(), GraphError>;

    /// Create a lookup index on `property` of nodes labelled `label`.
    ///
    /// Implementations should treat an already existing index as success.
    async fn create_index(&self, label: &str, property: &str) -> Result<(), GraphError>;

    /// Check if the database is reachable.
    async fn health_check(&self) -> Result<bool, GraphError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_loader_shared::{EntityRecord, RelationRecord};

    #[test]
    fn test_statement_binds_records_in_order() {
        let records: Vec<EntityRecord> = vec![
            [("id", "1"), ("name", "Alice")].into_iter().collect(),
            [("id", "2"), ("name", "Bob")].into_iter().collect(),
        ];

        let statement = Statement::new("UNWIND $values AS data RETURN data").with_records(&records);

        assert_eq!(statement.values.len(), 2);
        assert_eq!(statement.values[0]["name"], "Alice");
        assert_eq!(statement.values[1]["id"], "2");
        assert!(statement.returns.is_none());
    }

    #[test]
    fn test_statement_returning() {
        let statement = Statement::new("RETURN 1 AS one")
            .with_records(&[RelationRecord::new("1", "2")])
            .returning("one");

        assert_eq!(statement.returns.as_deref(), Some("one"));
        assert_eq!(statement.values[0]["start_id"], "1");
    }
}
