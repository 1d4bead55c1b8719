//! Outcome of a completed load.

use chrono::{DateTime, Utc};

/// Counters accumulated by the orchestrator over one run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// Whether the backend was wiped before loading.
    pub wiped: bool,
    /// Entity files loaded.
    pub entity_types: usize,
    /// Entities written across all files.
    pub entities_written: usize,
    /// Relation files loaded.
    pub relation_types: usize,
    /// Edges written across all files.
    pub relations_written: usize,
    /// Bulk-write calls issued.
    pub batches_written: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl LoadSummary {
    /// Start an empty summary stamped with the current time.
    pub fn start() -> Self {
        Self {
            wiped: false,
            entity_types: 0,
            entities_written: 0,
            relation_types: 0,
            relations_written: 0,
            batches_written: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock milliseconds between start and finish, if finished.
    pub fn elapsed_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}
