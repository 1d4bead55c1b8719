//! Recording backend shared by the pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use graph_loader_repository::{GraphBackend, GraphError, Statement};

/// One call observed by [`MockGraphBackend`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BackendCall {
    Run(Statement),
    DeleteAll,
    CreateIndex { label: String, property: String },
}

/// Mock graph backend recording every call in order.
pub(crate) struct MockGraphBackend {
    calls: Mutex<Vec<BackendCall>>,
    run_count: AtomicUsize,
    fail_run_at: Option<usize>,
    fail_index: bool,
    healthy: bool,
    created: Option<i64>,
}

impl MockGraphBackend {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            run_count: AtomicUsize::new(0),
            fail_run_at: None,
            fail_index: false,
            healthy: true,
            created: None,
        }
    }

    /// Fail the `n`th `run` call (zero based).
    pub(crate) fn failing_run_at(mut self, n: usize) -> Self {
        self.fail_run_at = Some(n);
        self
    }

    pub(crate) fn failing_index(mut self) -> Self {
        self.fail_index = true;
        self
    }

    pub(crate) fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Report `created` for every statement asking for a column.
    pub(crate) fn reporting_created(mut self, created: i64) -> Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn statements(&self) -> Vec<Statement> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Run(statement) => Some(statement),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GraphBackend for MockGraphBackend {
    async fn run(&self, statement: &Statement) -> Result<Option<i64>, GraphError> {
        let n = self.run_count.fetch_add(1, Ordering::SeqCst);
        self.record(BackendCall::Run(statement.clone()));

        if self.fail_run_at == Some(n) {
            return Err(GraphError::query("injected failure"));
        }
        Ok(statement
            .returns
            .as_ref()
            .map(|_| self.created.unwrap_or(statement.values.len() as i64)))
    }

    async fn delete_all(&self) -> Result<(), GraphError> {
        self.record(BackendCall::DeleteAll);
        Ok(())
    }

    async fn create_index(&self, label: &str, property: &str) -> Result<(), GraphError> {
        self.record(BackendCall::CreateIndex {
            label: label.to_string(),
            property: property.to_string(),
        });
        if self.fail_index {
            return Err(GraphError::index_creation("injected failure"));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, GraphError> {
        Ok(self.healthy)
    }
}
