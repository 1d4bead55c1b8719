//! Dependency initialization and wiring for the graph loader.

use std::sync::Arc;

use tracing::info;

use super::ImportArgs;
use crate::GraphLoaderError;
use graph_loader_pipeline::{LoaderConfig, Orchestrator};
use graph_loader_repository::{Neo4jClient, Neo4jConfig};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from parsed command line arguments.
    ///
    /// No connection is opened here; the Neo4j client connects on its first
    /// call, after the manifest has been read.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(GraphLoaderError)` - If the URL, credentials or batch size are invalid
    pub fn new(args: &ImportArgs) -> Result<Self, GraphLoaderError> {
        let mut neo4j = Neo4jConfig::new(&args.url, &args.auth)?;
        if let Some(database) = &args.database {
            neo4j = neo4j.with_database(database.clone());
        }

        let loader =
            LoaderConfig::new(&args.data_dir, args.batch_size)?.with_wipe_all(args.dropall);

        info!(
            url = %neo4j.url,
            user = %neo4j.credentials.user,
            database = ?neo4j.database,
            data_dir = %loader.data_dir.display(),
            batch_size = loader.batch_size,
            dropall = loader.wipe_all,
            "Initializing dependencies"
        );

        let client = Neo4jClient::new(neo4j);
        let orchestrator = Orchestrator::new(Arc::new(client), loader);

        Ok(Self { orchestrator })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_loader_pipeline::{LoadState, PipelineError};
    use graph_loader_repository::GraphError;
    use std::path::PathBuf;

    fn args() -> ImportArgs {
        ImportArgs {
            url: "bolt://localhost:7687/".to_string(),
            auth: "neo4j:myneo4j".to_string(),
            database: None,
            data_dir: PathBuf::from("/data"),
            batch_size: 1000,
            dropall: false,
        }
    }

    #[test]
    fn test_wires_orchestrator_without_connecting() {
        let mut args = args();
        args.dropall = true;

        let deps = Dependencies::new(&args).unwrap();

        assert_eq!(deps.orchestrator.state(), &LoadState::Init);
        assert!(deps.orchestrator.config().wipe_all);
    }

    #[test]
    fn test_rejects_bad_credentials() {
        let mut args = args();
        args.auth = "no-separator".to_string();

        let result = Dependencies::new(&args);

        assert!(matches!(
            result,
            Err(GraphLoaderError::GraphError(GraphError::InvalidCredentials(_)))
        ));
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let mut args = args();
        args.batch_size = 0;

        let result = Dependencies::new(&args);

        assert!(matches!(
            result,
            Err(GraphLoaderError::PipelineError(PipelineError::InvalidBatchSize(0)))
        ));
    }
}
