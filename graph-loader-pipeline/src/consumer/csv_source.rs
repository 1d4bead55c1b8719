//! Streaming CSV reader.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Reader, StringRecord};
use tracing::debug;

use crate::errors::PipelineError;
use graph_loader_shared::RawRow;

/// One open CSV file, read row by row.
///
/// The file handle lives as long as the source and is closed when the
/// source is dropped, including on early return through `?`.
pub struct CsvSource {
    path: PathBuf,
    reader: Reader<File>,
    headers: StringRecord,
}

impl CsvSource {
    /// Open `path` and read its header row.
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        let mut reader = Reader::from_path(path).map_err(|e| PipelineError::csv(path, e))?;
        let headers = reader
            .headers()
            .map_err(|e| PipelineError::csv(path, e))?
            .clone();

        debug!(path = %path.display(), columns = headers.len(), "Opened CSV file");
        Ok(Self {
            path: path.to_path_buf(),
            reader,
            headers,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decorated header names, in column order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Iterate the data rows, pairing each cell with its header.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<RawRow, PipelineError>> + '_ {
        let headers = &self.headers;
        let path = &self.path;
        self.reader.records().map(move |record| {
            let record = record.map_err(|e| PipelineError::csv(path, e))?;
            Ok(RawRow::from_pairs(headers.iter().zip(record.iter())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_rows_pair_headers_with_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("person.csv");
        fs::write(
            &path,
            "id:ID,name:string,:LABEL\n1,Alice,Person\n2,\"Bob, Jr.\",Person\n",
        )
        .unwrap();

        let mut source = CsvSource::open(&path).unwrap();
        let headers: Vec<&str> = source.headers().collect();
        assert_eq!(headers, ["id:ID", "name:string", ":LABEL"]);

        let rows: Vec<RawRow> = source.rows().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name:string"), Some("Bob, Jr."));
        assert_eq!(rows[0].get(":LABEL"), Some("Person"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = CsvSource::open(&dir.path().join("absent.csv"));

        assert!(matches!(result, Err(PipelineError::Csv { .. })));
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "id:ID,name\n1,Alice\n2\n").unwrap();

        let mut source = CsvSource::open(&path).unwrap();
        let results: Vec<_> = source.rows().collect();

        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(PipelineError::Csv { .. })));
    }
}
