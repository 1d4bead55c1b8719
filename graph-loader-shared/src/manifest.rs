//! Load manifest types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the parts of a relation spec key.
const RELATION_SPEC_SEPARATOR: char = '|';

/// Failure to parse a `StartType|RelationName|EndType` key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid relation spec '{key}': expected 'StartType|RelationName|EndType'")]
pub struct RelationSpecError {
    /// The offending manifest key.
    pub key: String,
}

/// Composite key naming a relation type and the node types it connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationSpec {
    /// Label of the node the edge starts from.
    pub start_type: String,
    /// Edge label.
    pub relation: String,
    /// Label of the node the edge points to.
    pub end_type: String,
}

impl RelationSpec {
    pub fn new(
        start_type: impl Into<String>,
        relation: impl Into<String>,
        end_type: impl Into<String>,
    ) -> Self {
        Self {
            start_type: start_type.into(),
            relation: relation.into(),
            end_type: end_type.into(),
        }
    }
}

impl FromStr for RelationSpec {
    type Err = RelationSpecError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = key.split(RELATION_SPEC_SEPARATOR).collect();
        match parts.as_slice() {
            [start, relation, end]
                if !start.is_empty() && !relation.is_empty() && !end.is_empty() =>
            {
                Ok(Self::new(*start, *relation, *end))
            }
            _ => Err(RelationSpecError {
                key: key.to_string(),
            }),
        }
    }
}

impl fmt::Display for RelationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.start_type,
            self.relation,
            self.end_type,
            sep = RELATION_SPEC_SEPARATOR
        )
    }
}

/// The parsed `metadata.json` of a data directory.
///
/// Both lists keep the order in which the manifest file declares them, and
/// every path is already resolved against the data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Entity type to CSV file, in declaration order.
    pub entity_data: Vec<(String, PathBuf)>,
    /// Relation spec to CSV file, in declaration order. Empty when the
    /// manifest has no `relation-data` section.
    pub relation_data: Vec<(RelationSpec, PathBuf)>,
}

impl Manifest {
    /// Number of entity files listed.
    pub fn entity_file_count(&self) -> usize {
        self.entity_data.len()
    }

    /// Number of relation files listed.
    pub fn relation_file_count(&self) -> usize {
        self.relation_data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relation_spec() {
        let spec: RelationSpec = "Person|KNOWS|Person".parse().unwrap();

        assert_eq!(spec.start_type, "Person");
        assert_eq!(spec.relation, "KNOWS");
        assert_eq!(spec.end_type, "Person");
        assert_eq!(spec.to_string(), "Person|KNOWS|Person");
    }

    #[test]
    fn test_parse_relation_spec_rejects_bad_keys() {
        for key in ["Person|KNOWS", "A|B|C|D", "|KNOWS|Person", "Person||Person", ""] {
            let err = key.parse::<RelationSpec>().unwrap_err();
            assert_eq!(err.key, key);
        }
    }
}
