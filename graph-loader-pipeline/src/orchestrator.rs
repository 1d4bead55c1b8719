//! Orchestrator module for the graph loader pipeline.
//!
//! Sequences a run: manifest load, backend check and optional wipe, then one
//! phase per entity file followed by one phase per relation file. The first
//! error aborts the run; batches written before it stay in the backend.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::batch::BatchAccumulator;
use crate::config::LoaderConfig;
use crate::consumer::CsvSource;
use crate::errors::PipelineError;
use crate::loader::{BulkWriter, IndexManager};
use crate::manifest::ManifestReader;
use crate::processor::{entity_field_set, project_entity_row, project_relation_row};
use graph_loader_repository::{GraphBackend, GraphError};
use graph_loader_shared::{LoadSummary, RelationSpec};

/// Where a run currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Init,
    ManifestLoaded,
    Wiped,
    EntityPhase { entity_type: String },
    RelationPhase { relation: String },
    Done,
    Failed(String),
}

/// Records and batches written for one file.
#[derive(Debug, Default, Clone, Copy)]
struct PhaseCount {
    records: usize,
    batches: usize,
}

impl PhaseCount {
    fn add_batch(&mut self, written: usize) {
        self.records += written;
        self.batches += 1;
    }
}

/// Orchestrator that drives one load from manifest to last batch.
///
/// The backend is used by one call at a time; there is no concurrency
/// between batches.
pub struct Orchestrator {
    config: LoaderConfig,
    backend: Arc<dyn GraphBackend>,
    index_manager: IndexManager,
    writer: BulkWriter,
    state: LoadState,
}

impl Orchestrator {
    /// Create a new orchestrator writing through `backend`.
    pub fn new(backend: Arc<dyn GraphBackend>, config: LoaderConfig) -> Self {
        Self {
            index_manager: IndexManager::new(backend.clone()),
            writer: BulkWriter::new(backend.clone(), config.index_property.clone()),
            backend,
            config,
            state: LoadState::Init,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Run the load to completion.
    ///
    /// On error the state becomes `Failed` and the error is returned as is.
    #[instrument(skip(self), fields(data_dir = %self.config.data_dir.display()))]
    pub async fn run(&mut self) -> Result<LoadSummary, PipelineError> {
        info!(
            batch_size = self.config.batch_size,
            wipe_all = self.config.wipe_all,
            "Starting graph load"
        );

        let mut summary = LoadSummary::start();
        match self.execute(&mut summary).await {
            Ok(()) => {
                summary.finish();
                self.transition(LoadState::Done);
                info!(
                    entity_types = summary.entity_types,
                    entities = summary.entities_written,
                    relation_types = summary.relation_types,
                    relations = summary.relations_written,
                    batches = summary.batches_written,
                    elapsed_ms = ?summary.elapsed_ms(),
                    "Graph load complete"
                );
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, state = ?self.state, "Graph load aborted");
                self.transition(LoadState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn execute(&mut self, summary: &mut LoadSummary) -> Result<(), PipelineError> {
        let manifest = ManifestReader::read(&self.config.data_dir)?;
        self.transition(LoadState::ManifestLoaded);
        self.verify_backend().await?;

        if self.config.wipe_all {
            self.wipe().await?;
            summary.wiped = true;
        }

        for (entity_type, path) in &manifest.entity_data {
            self.transition(LoadState::EntityPhase {
                entity_type: entity_type.clone(),
            });
            let count = self.load_entities(entity_type, path).await?;
            summary.entity_types += 1;
            summary.entities_written += count.records;
            summary.batches_written += count.batches;
        }

        if manifest.relation_data.is_empty() {
            debug!("Manifest lists no relation data");
        }
        for (spec, path) in &manifest.relation_data {
            self.transition(LoadState::RelationPhase {
                relation: spec.to_string(),
            });
            let count = self.load_relations(spec, path).await?;
            summary.relation_types += 1;
            summary.relations_written += count.records;
            summary.batches_written += count.batches;
        }

        Ok(())
    }

    async fn verify_backend(&self) -> Result<(), PipelineError> {
        let healthy = self
            .backend
            .health_check()
            .await
            .map_err(PipelineError::BackendUnavailable)?;
        if !healthy {
            return Err(PipelineError::BackendUnavailable(GraphError::connection(
                "health check returned no result",
            )));
        }
        debug!("Graph backend reachable");
        Ok(())
    }

    async fn wipe(&mut self) -> Result<(), PipelineError> {
        self.backend
            .delete_all()
            .await
            .map_err(PipelineError::WipeFailed)?;
        self.transition(LoadState::Wiped);
        info!("Dropped all data in graph database");
        Ok(())
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn load_entities(
        &mut self,
        entity_type: &str,
        path: &Path,
    ) -> Result<PhaseCount, PipelineError> {
        let property = self.config.index_property.clone();
        self.index_manager.ensure_index(entity_type, &property).await?;

        let mut source = CsvSource::open(path)?;
        let fields = entity_field_set(source.headers());
        if !fields.contains(&property) {
            return Err(PipelineError::MissingIdColumn {
                entity_type: entity_type.to_string(),
                property,
                path: source.path().to_path_buf(),
            });
        }

        let mut accumulator = BatchAccumulator::with_field_set(self.config.batch_size, fields)?;
        let mut count = PhaseCount::default();

        for row in source.rows() {
            let record = project_entity_row(&row?);
            if let Some(batch) = accumulator.add(record)? {
                count.add_batch(self.writer.write_entities(entity_type, &batch).await?);
                debug!(total = count.records, "Entity progress");
            }
        }
        if let Some(batch) = accumulator.flush() {
            count.add_batch(self.writer.write_entities(entity_type, &batch).await?);
        }

        info!(
            entity_type = %entity_type,
            entities = count.records,
            batches = count.batches,
            "Loaded entity file"
        );
        Ok(count)
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn load_relations(
        &mut self,
        spec: &RelationSpec,
        path: &Path,
    ) -> Result<PhaseCount, PipelineError> {
        let mut source = CsvSource::open(path)?;
        let mut accumulator = BatchAccumulator::new(self.config.batch_size)?;
        let mut count = PhaseCount::default();

        for (line, row) in source.rows().enumerate() {
            let record = project_relation_row(&row?).inspect_err(|e| {
                error!(error = %e, row = line + 1, "Unusable relation row");
            })?;
            if let Some(batch) = accumulator.add(record)? {
                count.add_batch(self.writer.write_relations(spec, &batch).await?);
                debug!(total = count.records, "Relation progress");
            }
        }
        if let Some(batch) = accumulator.flush() {
            count.add_batch(self.writer.write_relations(spec, &batch).await?);
        }

        info!(
            relation = %spec,
            relations = count.records,
            batches = count.batches,
            "Loaded relation file"
        );
        Ok(count)
    }

    fn transition(&mut self, next: LoadState) {
        debug!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }
}
