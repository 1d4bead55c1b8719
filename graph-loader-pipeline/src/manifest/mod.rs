//! Manifest reader.
//!
//! Locates and parses the `metadata.json` file describing which CSV file
//! holds each entity type and each relation type.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::errors::PipelineError;
use graph_loader_shared::{Manifest, RelationSpec};

/// File name of the manifest inside the data directory.
pub const MANIFEST_FILE_NAME: &str = "metadata.json";

/// On-disk shape of the manifest. Maps keep file order.
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(rename = "entity-data")]
    entity_data: Map<String, Value>,
    #[serde(rename = "relation-data", default)]
    relation_data: Map<String, Value>,
}

/// Reads the load manifest of a data directory.
pub struct ManifestReader;

impl ManifestReader {
    /// Path of the manifest for `data_dir`.
    pub fn manifest_path(data_dir: &Path) -> PathBuf {
        data_dir.join(MANIFEST_FILE_NAME)
    }

    /// Locate, read and parse the manifest of `data_dir`.
    ///
    /// # Returns
    ///
    /// * `Ok(Manifest)` - With every CSV path resolved against `data_dir`
    /// * `Err(PipelineError::MissingManifest)` - If `metadata.json` does not exist
    /// * `Err(PipelineError::MalformedManifest)` - If it cannot be parsed
    #[instrument(skip_all, fields(data_dir = %data_dir.display()))]
    pub fn read(data_dir: &Path) -> Result<Manifest, PipelineError> {
        let path = Self::manifest_path(data_dir);
        if !path.is_file() {
            return Err(PipelineError::MissingManifest { path });
        }

        let contents = fs::read_to_string(&path).map_err(|e| PipelineError::io(&path, e))?;
        let manifest = Self::parse(&contents, data_dir)?;

        info!(
            entity_files = manifest.entity_file_count(),
            relation_files = manifest.relation_file_count(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse manifest text, resolving CSV paths against `data_dir`.
    pub fn parse(contents: &str, data_dir: &Path) -> Result<Manifest, PipelineError> {
        let raw: RawManifest =
            serde_json::from_str(contents).map_err(|e| PipelineError::manifest(e.to_string()))?;

        let entity_data = raw
            .entity_data
            .into_iter()
            .map(|(entity_type, file)| {
                if entity_type.is_empty() {
                    return Err(PipelineError::manifest("empty entity type name"));
                }
                let path = Self::resolve(data_dir, &entity_type, file)?;
                Ok((entity_type, path))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let relation_data = raw
            .relation_data
            .into_iter()
            .map(|(key, file)| {
                let spec: RelationSpec = key
                    .parse()
                    .map_err(|e: graph_loader_shared::RelationSpecError| {
                        PipelineError::manifest(e.to_string())
                    })?;
                let path = Self::resolve(data_dir, &key, file)?;
                Ok((spec, path))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(?entity_data, ?relation_data, "Parsed manifest");
        Ok(Manifest {
            entity_data,
            relation_data,
        })
    }

    fn resolve(data_dir: &Path, key: &str, file: Value) -> Result<PathBuf, PipelineError> {
        match file {
            Value::String(relative) if !relative.is_empty() => Ok(data_dir.join(relative)),
            other => Err(PipelineError::manifest(format!(
                "file for '{}' must be a non-empty string, got {}",
                key, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_keeps_declaration_order() {
        let manifest = ManifestReader::parse(
            r#"{
                "entity-data": {
                    "Person": "person.csv",
                    "Company": "company.csv",
                    "Address": "a/address.csv"
                },
                "relation-data": {"Person|WORKS_AT|Company": "works_at.csv"}
            }"#,
            Path::new("/data"),
        )
        .unwrap();

        let types: Vec<&str> = manifest
            .entity_data
            .iter()
            .map(|(t, _)| t.as_str())
            .collect();
        assert_eq!(types, ["Person", "Company", "Address"]);
        assert_eq!(manifest.entity_data[2].1, PathBuf::from("/data/a/address.csv"));

        let (spec, path) = &manifest.relation_data[0];
        assert_eq!(spec, &RelationSpec::new("Person", "WORKS_AT", "Company"));
        assert_eq!(path, &PathBuf::from("/data/works_at.csv"));
    }

    #[test]
    fn test_parse_without_relation_data() {
        let manifest =
            ManifestReader::parse(r#"{"entity-data": {"Person": "p.csv"}}"#, Path::new("d"))
                .unwrap();

        assert_eq!(manifest.entity_file_count(), 1);
        assert!(manifest.relation_data.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        let cases = [
            "not json",
            r#"{"relation-data": {}}"#,
            r#"{"entity-data": {"Person": 3}}"#,
            r#"{"entity-data": {"Person": ""}}"#,
            r#"{"entity-data": {}, "relation-data": {"Person|KNOWS": "k.csv"}}"#,
        ];

        for case in cases {
            assert!(
                matches!(
                    ManifestReader::parse(case, Path::new("d")),
                    Err(PipelineError::MalformedManifest(_))
                ),
                "accepted {}",
                case
            );
        }
    }

    #[test]
    fn test_read_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();

        let err = ManifestReader::read(dir.path()).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::MissingManifest { ref path } if path == &dir.path().join("metadata.json")
        ));
    }

    #[test]
    fn test_read_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE_NAME),
            r#"{"entity-data": {"Person": "person.csv"}}"#,
        )
        .unwrap();

        let manifest = ManifestReader::read(dir.path()).unwrap();

        assert_eq!(manifest.entity_data[0].1, dir.path().join("person.csv"));
    }
}
