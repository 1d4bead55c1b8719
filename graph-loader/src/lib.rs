//! # Graph Loader
//!
//! Main library for the graph loader binary.
//!
//! This crate provides the command line surface, logging setup and
//! dependency wiring for running the ingestion pipeline.

pub mod config;

pub use config::{Cli, Commands, Dependencies, ImportArgs};

use std::env;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors that can occur during loader initialization or execution.
#[derive(Error, Debug)]
pub enum GraphLoaderError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] graph_loader_pipeline::PipelineError),

    /// Graph backend error.
    #[error("Graph error: {0}")]
    GraphError(#[from] graph_loader_repository::GraphError),
}

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Setting
/// `LOG_FORMAT=json` switches to one JSON object per event.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true);

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
