//! Consumer module for the graph loader pipeline.
//!
//! Streams raw rows out of the CSV files named by the manifest.

mod csv_source;

pub use csv_source::CsvSource;
