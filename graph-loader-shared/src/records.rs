//! Rows read from CSV files and the records projected from them.

use std::collections::HashMap;

/// One CSV line as an ordered mapping from decorated header (`id:ID`,
/// `name:string`, `:START_ID`) to the raw cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row by pairing headers with values position by position.
    pub fn from_pairs<H, V>(pairs: impl IntoIterator<Item = (H, V)>) -> Self
    where
        H: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(h, v)| (h.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Value of the first cell whose header equals `header` exactly.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered list of bare field names shared by every record of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldSet(Vec<String>);

impl FieldSet {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// A record that can be bound as one element of a bulk-write parameter list.
pub trait Record {
    /// Field names of this record, in order.
    fn field_set(&self) -> FieldSet;

    /// Whether this record carries exactly the fields of `fields`, in order.
    fn matches_field_set(&self, fields: &FieldSet) -> bool;

    /// Key/value view bound to the backend statement.
    fn to_param_row(&self) -> HashMap<String, String>;
}

/// Properties of one entity keyed by bare property name.
///
/// Values are kept as the raw CSV strings; no type coercion happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    properties: Vec<(String, String)>,
}

impl EntityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. A repeated key keeps its first position and
    /// takes the latest value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EntityRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Record for EntityRecord {
    fn field_set(&self) -> FieldSet {
        FieldSet::new(self.properties.iter().map(|(k, _)| k.clone()).collect())
    }

    fn matches_field_set(&self, fields: &FieldSet) -> bool {
        self.properties.len() == fields.len()
            && self
                .properties
                .iter()
                .zip(fields.names())
                .all(|((k, _), name)| k == name)
    }

    fn to_param_row(&self) -> HashMap<String, String> {
        self.properties.iter().cloned().collect()
    }
}

/// Endpoints of one edge, taken from the `:START_ID` and `:END_ID` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRecord {
    pub start_id: String,
    pub end_id: String,
}

impl RelationRecord {
    pub const START_ID: &'static str = "start_id";
    pub const END_ID: &'static str = "end_id";

    pub fn new(start_id: impl Into<String>, end_id: impl Into<String>) -> Self {
        Self {
            start_id: start_id.into(),
            end_id: end_id.into(),
        }
    }
}

impl Record for RelationRecord {
    fn field_set(&self) -> FieldSet {
        FieldSet::new(vec![Self::START_ID.to_string(), Self::END_ID.to_string()])
    }

    fn matches_field_set(&self, fields: &FieldSet) -> bool {
        fields.names() == [Self::START_ID, Self::END_ID]
    }

    fn to_param_row(&self) -> HashMap<String, String> {
        HashMap::from([
            (Self::START_ID.to_string(), self.start_id.clone()),
            (Self::END_ID.to_string(), self.end_id.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_record_repeated_key_keeps_position() {
        let record: EntityRecord = [("id", "1"), ("name", "Alice"), ("id", "2")]
            .into_iter()
            .collect();

        assert_eq!(record.get("id"), Some("2"));
        assert_eq!(record.field_set().names(), ["id", "name"]);
    }

    #[test]
    fn test_entity_record_field_set_match() {
        let record: EntityRecord = [("id", "1"), ("name", "Alice")].into_iter().collect();

        let same = FieldSet::new(vec!["id".into(), "name".into()]);
        let reordered = FieldSet::new(vec!["name".into(), "id".into()]);
        let wider = FieldSet::new(vec!["id".into(), "name".into(), "age".into()]);

        assert!(record.matches_field_set(&same));
        assert!(!record.matches_field_set(&reordered));
        assert!(!record.matches_field_set(&wider));
    }

    #[test]
    fn test_relation_record_param_row() {
        let row = RelationRecord::new("1", "2").to_param_row();

        assert_eq!(row.get("start_id").map(String::as_str), Some("1"));
        assert_eq!(row.get("end_id").map(String::as_str), Some("2"));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_raw_row_lookup_is_exact() {
        let row = RawRow::from_pairs([("id:ID", "7"), (":START_ID", "1")]);

        assert_eq!(row.get(":START_ID"), Some("1"));
        assert_eq!(row.get("id"), None);
        assert_eq!(row.len(), 2);
    }
}
