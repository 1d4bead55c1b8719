//! Neo4j client implementation.
//!
//! This module provides the concrete implementation of `GraphBackend`
//! using the neo4rs driver.

use std::collections::HashMap;

use async_trait::async_trait;
use neo4rs::{query, BoltType, ConfigBuilder, Graph, Query};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::config::Neo4jConfig;
use crate::cypher;
use crate::errors::GraphError;
use crate::interfaces::{GraphBackend, ParamRow, Statement};

/// Neo4j client implementation.
///
/// The Bolt connection pool is opened on the first backend call, so building
/// a client never touches the network.
///
/// # Example
///
/// ```ignore
/// let config = Neo4jConfig::new("bolt://localhost:7687/", "neo4j:secret")?;
/// let client = Neo4jClient::new(config);
///
/// client.create_index("Person", "id").await?;
/// ```
pub struct Neo4jClient {
    config: Neo4jConfig,
    graph: OnceCell<Graph>,
}

impl Neo4jClient {
    /// Create a client for the given configuration without connecting.
    pub fn new(config: Neo4jConfig) -> Self {
        Self {
            config,
            graph: OnceCell::new(),
        }
    }

    /// Return the connection pool, opening it on first use.
    async fn graph(&self) -> Result<&Graph, GraphError> {
        self.graph
            .get_or_try_init(|| async {
                let mut builder = ConfigBuilder::default()
                    .uri(self.config.url.as_str())
                    .user(self.config.credentials.user.as_str())
                    .password(self.config.credentials.password.as_str())
                    .fetch_size(self.config.fetch_size);
                if let Some(database) = &self.config.database {
                    builder = builder.db(database.as_str());
                }
                let config = builder
                    .build()
                    .map_err(|e| GraphError::connection(e.to_string()))?;

                let graph = Graph::connect(config)
                    .await
                    .map_err(|e| GraphError::connection(e.to_string()))?;

                info!(
                    url = %self.config.url,
                    user = %self.config.credentials.user,
                    database = ?self.config.database,
                    "Connected to Neo4j"
                );
                Ok::<Graph, GraphError>(graph)
            })
            .await
    }

    /// Convert bound rows into the Bolt list passed as `$values`.
    fn bolt_values(values: &[ParamRow]) -> Vec<HashMap<String, BoltType>> {
        values
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(k, v)| (k.clone(), BoltType::from(v.clone())))
                    .collect()
            })
            .collect()
    }

    fn build_query(statement: &Statement) -> Query {
        query(&statement.text).param(Statement::VALUES_PARAM, Self::bolt_values(&statement.values))
    }

    /// Execute a statement and read `column` from its first result row.
    async fn fetch_i64(&self, q: Query, column: &str) -> Result<i64, GraphError> {
        let graph = self.graph().await?;
        let mut stream = graph
            .execute(q)
            .await
            .map_err(|e| GraphError::query(e.to_string()))?;

        let row = stream
            .next()
            .await
            .map_err(|e| GraphError::query(e.to_string()))?
            .ok_or_else(|| GraphError::parse(format!("no result row for column '{}'", column)))?;

        row.get::<i64>(column)
            .map_err(|e| GraphError::parse(format!("column '{}': {}", column, e)))
    }
}

#[async_trait]
impl GraphBackend for Neo4jClient {
    #[instrument(skip(self, statement), fields(rows = statement.values.len()))]
    async fn run(&self, statement: &Statement) -> Result<Option<i64>, GraphError> {
        let q = Self::build_query(statement);

        match &statement.returns {
            Some(column) => {
                let value = self.fetch_i64(q, column).await?;
                debug!(column = %column, value = value, "Statement executed");
                Ok(Some(value))
            }
            None => {
                self.graph()
                    .await?
                    .run(q)
                    .await
                    .map_err(|e| GraphError::query(e.to_string()))?;
                debug!("Statement executed");
                Ok(None)
            }
        }
    }

    async fn delete_all(&self) -> Result<(), GraphError> {
        self.graph()
            .await?
            .run(query(cypher::DELETE_ALL))
            .await
            .map_err(|e| GraphError::query(e.to_string()))
    }

    async fn create_index(&self, label: &str, property: &str) -> Result<(), GraphError> {
        self.graph()
            .await?
            .run(query(&cypher::create_index(label, property)))
            .await
            .map_err(|e| GraphError::index_creation(e.to_string()))
    }

    async fn health_check(&self) -> Result<bool, GraphError> {
        let value = self.fetch_i64(query("RETURN 1 AS ok"), "ok").await?;
        Ok(value == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bolt_values_keep_every_row() {
        let rows = vec![
            ParamRow::from([("id".to_string(), "1".to_string())]),
            ParamRow::from([
                ("id".to_string(), "2".to_string()),
                ("name".to_string(), "Bob".to_string()),
            ]),
        ];

        let values = Neo4jClient::bolt_values(&rows);

        assert_eq!(values.len(), 2);
        assert_eq!(values[1].len(), 2);
        assert_eq!(values[0]["id"], BoltType::from("1".to_string()));
    }

    #[tokio::test]
    async fn test_new_does_not_connect() {
        let config = Neo4jConfig::new("bolt://localhost:1/", "neo4j:secret").unwrap();
        let client = Neo4jClient::new(config);

        assert!(client.graph.get().is_none());
    }
}
