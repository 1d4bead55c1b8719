//! Cypher text helpers shared by the backend and the bulk writer.

/// Statement removing every node together with its relationships.
pub const DELETE_ALL: &str = "MATCH (n) DETACH DELETE n";

/// Quote a label, relationship type or property key with backticks.
///
/// Embedded backticks are doubled, so any string becomes a valid identifier.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Statement creating a lookup index on `property` of `label` nodes.
///
/// `IF NOT EXISTS` makes repeated runs against the same database a no-op.
pub fn create_index(label: &str, property: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS FOR (n:{}) ON (n.{})",
        quote_identifier(label),
        quote_identifier(property)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("Person"), "`Person`");
        assert_eq!(quote_identifier("first name"), "`first name`");
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_create_index() {
        assert_eq!(
            create_index("Person", "id"),
            "CREATE INDEX IF NOT EXISTS FOR (n:`Person`) ON (n.`id`)"
        );
    }
}
