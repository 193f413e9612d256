//! Identifier resolution for book records.
//!
//! The engine only accepts identifiers over `[A-Za-z0-9_-]`. A record's
//! pre-existing `content_id` takes priority (assumed unique and stable);
//! otherwise the identifier is derived from the source filename.
//!
//! Derived identifiers are not checked for uniqueness across a run: two
//! filenames that sanitize to the same string overwrite each other at the
//! engine (last write wins). Known limitation, kept as-is.

use std::path::Path;

use serde_json::Value;

use book_indexer_shared::BookRecord;

/// Resolve the engine-safe identifier for a record.
///
/// Priority order:
/// 1. the record's `content_id` field, stringified verbatim;
/// 2. the source filename with its extension stripped and every character
///    outside `[A-Za-z0-9_-]` replaced one-for-one with `_`.
pub fn resolve_id(record: &BookRecord) -> String {
    if let Some(value) = record.content_id() {
        return stringify(value);
    }

    sanitize(file_stem(&record.source_file))
}

/// Render a JSON value as a bare string (no quoting for string values).
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The filename without its final extension.
fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename)
}

/// Replace every character outside the engine-safe alphabet with `_`.
fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
