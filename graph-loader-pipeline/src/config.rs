//! Run configuration for the loader.

use std::path::{Path, PathBuf};

use crate::errors::PipelineError;

/// Default number of records per bulk write.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Property every entity type is indexed and matched on.
pub const DEFAULT_INDEX_PROPERTY: &str = "id";

/// Settings threaded explicitly through every component of a run.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory holding `metadata.json` and the CSV files it names.
    pub data_dir: PathBuf,
    /// Records per bulk write. Always at least 1.
    pub batch_size: usize,
    /// Delete every node and relationship before loading.
    pub wipe_all: bool,
    /// Property indexed on each entity type and used to resolve edge endpoints.
    pub index_property: String,
}

impl LoaderConfig {
    /// Create a config, rejecting a batch size below 1.
    pub fn new(data_dir: impl AsRef<Path>, batch_size: i64) -> Result<Self, PipelineError> {
        let batch_size = usize::try_from(batch_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(PipelineError::InvalidBatchSize(batch_size))?;

        Ok(Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            batch_size,
            wipe_all: false,
            index_property: DEFAULT_INDEX_PROPERTY.to_string(),
        })
    }

    /// Request a full wipe before loading.
    pub fn with_wipe_all(mut self, wipe_all: bool) -> Self {
        self.wipe_all = wipe_all;
        self
    }
}
