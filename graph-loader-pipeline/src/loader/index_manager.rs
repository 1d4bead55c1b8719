//! Lookup index creation.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::PipelineError;
use graph_loader_repository::GraphBackend;

/// Creates the lookup index of each entity type before its first write.
pub struct IndexManager {
    backend: Arc<dyn GraphBackend>,
}

impl IndexManager {
    pub fn new(backend: Arc<dyn GraphBackend>) -> Self {
        Self { backend }
    }

    /// Ensure an index on `property` of `entity_type` nodes exists.
    ///
    /// Backend failures are not retried.
    #[instrument(skip(self))]
    pub async fn ensure_index(
        &self,
        entity_type: &str,
        property: &str,
    ) -> Result<(), PipelineError> {
        self.backend
            .create_index(entity_type, property)
            .await
            .map_err(PipelineError::IndexCreationFailed)?;

        info!(
            entity_type = %entity_type,
            property = %property,
            "Created index on property of entity type"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BackendCall, MockGraphBackend};

    #[tokio::test]
    async fn test_ensure_index() {
        let backend = Arc::new(MockGraphBackend::new());
        let manager = IndexManager::new(backend.clone());

        manager.ensure_index("Person", "id").await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![BackendCall::CreateIndex {
                label: "Person".to_string(),
                property: "id".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_ensure_index_failure() {
        let backend = Arc::new(MockGraphBackend::new().failing_index());
        let manager = IndexManager::new(backend);

        let result = manager.ensure_index("Person", "id").await;

        assert!(matches!(result, Err(PipelineError::IndexCreationFailed(_))));
    }
}
