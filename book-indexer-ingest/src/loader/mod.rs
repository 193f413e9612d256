//! Loader module for the book indexer ingest.
//!
//! Reads book records from a local directory of JSON files, one record per
//! file, and assigns each its engine-safe identifier. Files are processed
//! in sorted filename order so runs are deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::errors::IngestError;
use crate::resolver::resolve_id;
use book_indexer_shared::BookRecord;

/// File extension recognized as a record source.
const RECORD_EXTENSION: &str = "json";

/// Loader that reads book records from a directory.
///
/// A file that fails to read or parse is skipped with a logged reason; it
/// never aborts the run. A missing directory yields an empty result —
/// "nothing to ingest", not a crash.
pub struct RecordLoader {
    data_dir: PathBuf,
}

impl RecordLoader {
    /// Create a loader for the given source directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load every parseable record from the source directory.
    ///
    /// Records are returned in sorted filename order, each already carrying
    /// its resolved identifier under the `id` field.
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub fn load(&self) -> Result<Vec<BookRecord>, IngestError> {
        if !self.data_dir.exists() {
            warn!(
                data_dir = %self.data_dir.display(),
                "Source directory not found, nothing to ingest"
            );
            return Ok(Vec::new());
        }

        let mut filenames: Vec<String> = fs::read_dir(&self.data_dir)
            .map_err(|e| IngestError::loader(e.to_string()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| {
                Path::new(name).extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION)
            })
            .collect();
        filenames.sort();

        info!(total_files = filenames.len(), "Scanning source directory");

        let mut records = Vec::with_capacity(filenames.len());
        let mut skipped = 0;

        for filename in &filenames {
            match self.load_file(filename) {
                Ok(record) => {
                    info!(file = %filename, id = record.id().unwrap_or(""), "Loaded record");
                    records.push(record);
                }
                Err(e) => {
                    warn!(file = %filename, error = %e, "Skipping unparsable file");
                    skipped += 1;
                }
            }
        }

        info!(loaded = records.len(), skipped = skipped, "Record load complete");
        Ok(records)
    }

    /// Parse one source file into a record and assign its identifier.
    fn load_file(&self, filename: &str) -> Result<BookRecord, IngestError> {
        let path = self.data_dir.join(filename);
        let contents = fs::read_to_string(&path).map_err(|e| IngestError::loader(e.to_string()))?;

        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| IngestError::parse(e.to_string()))?;
        let fields = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(IngestError::parse(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut record = BookRecord::new(filename, fields);
        let id = resolve_id(&record);
        record.set_id(id);
        Ok(record)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
