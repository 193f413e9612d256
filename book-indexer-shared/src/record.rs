//! Book record type.
//!
//! A record is the raw JSON object parsed from one source file. The schema
//! is not validated here; the record is submitted to the engine as-is once
//! an `id` field has been injected.

use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which the engine-safe identifier is injected before submission.
pub const ID_FIELD: &str = "id";

/// Key of the optional pre-existing content identifier in source records.
pub const CONTENT_ID_FIELD: &str = "content_id";

/// One book record loaded from a source file.
///
/// The fields map is the parsed JSON object, flattened on serialization so
/// the engine receives the original document shape. The source filename is
/// kept for identifier derivation and diagnostics only and is never
/// submitted.
#[derive(Debug, Clone, Serialize)]
pub struct BookRecord {
    /// Name of the file this record was parsed from.
    #[serde(skip)]
    pub source_file: String,
    /// The record's fields, exactly as parsed.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl BookRecord {
    /// Create a record from its source filename and parsed fields.
    pub fn new(source_file: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            source_file: source_file.into(),
            fields,
        }
    }

    /// The pre-existing content identifier, if the record carries one.
    pub fn content_id(&self) -> Option<&Value> {
        self.fields.get(CONTENT_ID_FIELD)
    }

    /// The injected engine identifier, if already set.
    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Inject the resolved identifier under the `id` field.
    ///
    /// Records are mutated exactly once, between loading and submission.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.fields
            .insert(ID_FIELD.to_string(), Value::String(id.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_set_id_visible_in_serialization() {
        let mut record = BookRecord::new("a.json", fields(json!({"title": "Dune"})));
        record.set_id("dune");

        let serialized = serde_json::to_value(&record).unwrap();
        assert_eq!(serialized, json!({"title": "Dune", "id": "dune"}));
    }

    #[test]
    fn test_source_file_not_serialized() {
        let record = BookRecord::new("a.json", fields(json!({"title": "Dune"})));
        let serialized = serde_json::to_value(&record).unwrap();
        assert!(serialized.get("source_file").is_none());
    }

    #[test]
    fn test_content_id_lookup() {
        let record = BookRecord::new("a.json", fields(json!({"content_id": 42})));
        assert_eq!(record.content_id(), Some(&json!(42)));

        let record = BookRecord::new("a.json", fields(json!({"title": "Dune"})));
        assert!(record.content_id().is_none());
    }
}
