//! Bulk writes of entity and relation batches.
//!
//! Each write is one backend call that unwinds the bound `$values` list and
//! applies one create per element. A failing call may leave a prefix of its
//! batch persisted; nothing is rolled back or retried.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::batch::Batch;
use crate::errors::PipelineError;
use graph_loader_repository::cypher::quote_identifier;
use graph_loader_repository::{GraphBackend, GraphError, Statement};
use graph_loader_shared::{EntityRecord, FieldSet, RelationRecord, RelationSpec};

/// Column the relation statement reports the number of resolved records in.
pub const CREATED_COLUMN: &str = "created";

/// Bulk-create statement for `entity_type` nodes carrying `fields`.
///
/// Every field `p` is assigned from `data.p` of the unwound element.
pub fn entity_statement(entity_type: &str, fields: &FieldSet) -> String {
    let assignments = fields
        .names()
        .iter()
        .map(|name| {
            let key = quote_identifier(name);
            format!("{}: data.{}", key, key)
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UNWIND ${} AS data CREATE (:{} {{{}}})",
        Statement::VALUES_PARAM,
        quote_identifier(entity_type),
        assignments
    )
}

/// Bulk statement creating `spec` edges between nodes matched on `id_property`.
///
/// Elements are unwound by index and the statement returns the number of
/// distinct indices that produced at least one edge. Duplicate node ids can
/// multiply edges but never inflate that count.
pub fn relation_statement(spec: &RelationSpec, id_property: &str) -> String {
    let id = quote_identifier(id_property);
    format!(
        "UNWIND range(0, size(${values}) - 1) AS i \
         WITH i, ${values}[i] AS data \
         MATCH (a:{start} {{{id}: data.{start_id}}}) \
         MATCH (b:{end} {{{id}: data.{end_id}}}) \
         CREATE (a)-[:{relation}]->(b) \
         RETURN count(DISTINCT i) AS {created}",
        values = Statement::VALUES_PARAM,
        start = quote_identifier(&spec.start_type),
        end = quote_identifier(&spec.end_type),
        relation = quote_identifier(&spec.relation),
        id = id,
        start_id = RelationRecord::START_ID,
        end_id = RelationRecord::END_ID,
        created = CREATED_COLUMN,
    )
}

/// Writes batches through the backend, caching one statement per type.
pub struct BulkWriter {
    backend: Arc<dyn GraphBackend>,
    id_property: String,
    entity_statements: HashMap<String, (FieldSet, String)>,
    relation_statements: HashMap<RelationSpec, String>,
}

impl BulkWriter {
    /// Create a writer resolving edge endpoints on `id_property`.
    pub fn new(backend: Arc<dyn GraphBackend>, id_property: impl Into<String>) -> Self {
        Self {
            backend,
            id_property: id_property.into(),
            entity_statements: HashMap::new(),
            relation_statements: HashMap::new(),
        }
    }

    /// Create one `entity_type` node per record of `batch`.
    ///
    /// The statement is built from the batch's field set the first time a
    /// type is written and reused afterwards; a later batch with other
    /// fields is rejected.
    #[instrument(skip(self, batch), fields(count = batch.len()))]
    pub async fn write_entities(
        &mut self,
        entity_type: &str,
        batch: &Batch<EntityRecord>,
    ) -> Result<usize, PipelineError> {
        let (fields, text) = self
            .entity_statements
            .entry(entity_type.to_string())
            .or_insert_with(|| {
                let text = entity_statement(entity_type, batch.fields());
                debug!(statement = %text, "Built entity statement");
                (batch.fields().clone(), text)
            });

        if fields != batch.fields() {
            return Err(PipelineError::FieldSetDrift {
                expected: fields.clone(),
                found: batch.fields().clone(),
            });
        }

        let statement = Statement::new(text.as_str()).with_records(batch.records());
        self.backend
            .run(&statement)
            .await
            .map_err(PipelineError::WriteFailed)?;

        info!(entity_type = %entity_type, count = batch.len(), "Wrote entities");
        Ok(batch.len())
    }

    /// Create one `spec` edge per record of `batch`.
    ///
    /// Fails with `DanglingEndpoint` when the backend reports fewer resolved
    /// records than the batch holds, meaning some endpoint id matched no node.
    #[instrument(skip(self, batch), fields(relation = %spec, count = batch.len()))]
    pub async fn write_relations(
        &mut self,
        spec: &RelationSpec,
        batch: &Batch<RelationRecord>,
    ) -> Result<usize, PipelineError> {
        let id_property = &self.id_property;
        let text = self
            .relation_statements
            .entry(spec.clone())
            .or_insert_with(|| relation_statement(spec, id_property));

        let statement = Statement::new(text.as_str())
            .with_records(batch.records())
            .returning(CREATED_COLUMN);
        let created = self
            .backend
            .run(&statement)
            .await
            .map_err(PipelineError::WriteFailed)?;

        if let Some(created) = created {
            let expected = batch.len();
            if created < expected as i64 {
                return Err(PipelineError::DanglingEndpoint {
                    relation: spec.to_string(),
                    expected,
                    created,
                });
            }
            if created > expected as i64 {
                return Err(PipelineError::WriteFailed(GraphError::parse(format!(
                    "'{}' reported {} resolved records for a batch of {}",
                    CREATED_COLUMN, created, expected
                ))));
            }
        }

        info!(relation = %spec, count = batch.len(), "Wrote relations");
        Ok(batch.len())
    }
}
