//! Index configuration and attribute declarations.
//!
//! Declares which book fields are searchable and which are filterable.
//! Applying these settings is idempotent and independent of data load, so
//! an existing index can be reconfigured without reloading documents.

/// The default uid of the book search index.
pub const DEFAULT_INDEX_UID: &str = "ebooks";

/// Searchable fields, in ranking order.
///
/// `table_of_contents.chapter` is a nested path: chapter titles inside the
/// table-of-contents objects are searchable too.
pub const SEARCHABLE_ATTRIBUTES: &[&str] = &[
    "title",
    "authors",
    "subject",
    "description",
    "table_of_contents.chapter",
];

/// Fields usable in filter expressions.
pub const FILTERABLE_ATTRIBUTES: &[&str] =
    &["genre", "publisher", "publication_date", "language"];

/// Configuration for the target index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The index uid.
    pub uid: String,
}

impl IndexConfig {
    /// Create a config for the given index uid.
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_UID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_searchable_attributes_ranking() {
        // Title outranks everything; the nested chapter path comes last.
        assert_eq!(SEARCHABLE_ATTRIBUTES.first(), Some(&"title"));
        assert_eq!(
            SEARCHABLE_ATTRIBUTES.last(),
            Some(&"table_of_contents.chapter")
        );
    }

    #[test]
    fn test_attribute_sets_disjoint() {
        for attr in FILTERABLE_ATTRIBUTES {
            assert!(!SEARCHABLE_ATTRIBUTES.contains(attr));
        }
    }

    #[test]
    fn test_default_index_uid() {
        assert_eq!(IndexConfig::default().uid, "ebooks");
    }
}
