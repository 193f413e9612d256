//! Orchestrator module for the book indexer ingest.
//!
//! Coordinates the loader, submitter, and tracker components for one
//! ingestion run: load records, submit them in batches, declare the index
//! attributes, then follow every indexing task to a terminal state.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::errors::IngestError;
use crate::loader::RecordLoader;
use crate::submitter::{BatchSubmitter, SubmitterConfig};
use crate::tracker::{TaskTracker, TrackerConfig};
use book_indexer_repository::{
    meilisearch::{FILTERABLE_ATTRIBUTES, SEARCHABLE_ATTRIBUTES},
    SearchEngineClient,
};
use book_indexer_shared::TrackingReport;

/// Pipeline that runs one ingestion end to end.
///
/// The run is strictly sequential on the calling task: submission proceeds
/// one batch at a time and polling is an awaited loop. The pipeline assumes
/// exclusive ownership of the target index for the duration of the run.
pub struct IngestPipeline {
    client: Arc<dyn SearchEngineClient>,
    loader: RecordLoader,
    submitter: BatchSubmitter,
    tracker: TaskTracker,
}

impl IngestPipeline {
    /// Create a pipeline over the given client and source directory with
    /// default batching and polling configuration.
    pub fn new(client: Arc<dyn SearchEngineClient>, data_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(
            client,
            data_dir,
            SubmitterConfig::default(),
            TrackerConfig::default(),
        )
    }

    /// Create a pipeline with custom submitter and tracker configuration.
    pub fn with_config(
        client: Arc<dyn SearchEngineClient>,
        data_dir: impl Into<PathBuf>,
        submitter_config: SubmitterConfig,
        tracker_config: TrackerConfig,
    ) -> Self {
        Self {
            loader: RecordLoader::new(data_dir),
            submitter: BatchSubmitter::with_config(client.clone(), submitter_config),
            tracker: TaskTracker::with_config(client.clone(), tracker_config),
            client,
        }
    }

    /// Run one full ingestion: load, submit, configure, track.
    ///
    /// When the source yields no records the run short-circuits with a zero
    /// report and never touches the engine.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<TrackingReport, IngestError> {
        let records = self.loader.load()?;

        if records.is_empty() {
            info!("No records to ingest");
            return Ok(TrackingReport::default());
        }

        let handles = self.submitter.submit(&records).await?;

        // Settings are independent of submission success; their tasks are
        // not tracked.
        self.configure_index().await?;

        let report = self.tracker.track(&handles).await?;

        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Ingestion run complete"
        );
        Ok(report)
    }

    /// Declare the searchable and filterable attributes on the target index.
    ///
    /// Idempotent, and usable on its own to reconfigure an existing index
    /// without reloading data.
    pub async fn configure_index(&self) -> Result<(), IngestError> {
        let searchable = self
            .client
            .update_searchable_attributes(SEARCHABLE_ATTRIBUTES)
            .await?;
        let filterable = self
            .client
            .update_filterable_attributes(FILTERABLE_ATTRIBUTES)
            .await?;

        debug!(
            searchable_task = %searchable,
            filterable_task = %filterable,
            "Attribute settings enqueued"
        );
        info!("Index settings updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use book_indexer_repository::SearchError;
    use book_indexer_shared::{BookRecord, TaskHandle, TaskStatus};
    use std::fs::File;
    use std::io::Write;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Mock client recording the full engine call sequence.
    struct RecordingEngineClient {
        calls: Mutex<Vec<String>>,
        submitted_ids: Mutex<Vec<String>>,
        next_uid: AtomicU64,
    }

    impl RecordingEngineClient {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                submitted_ids: Mutex::new(Vec::new()),
                next_uid: AtomicU64::new(1),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }
    }

    #[async_trait]
    impl SearchEngineClient for RecordingEngineClient {
        async fn delete_index(&self) -> Result<TaskHandle, SearchError> {
            self.record("delete_index");
            Err(SearchError::index_not_found("ebooks"))
        }

        async fn add_documents(
            &self,
            records: &[BookRecord],
            _primary_key: &str,
        ) -> Result<TaskHandle, SearchError> {
            self.record("add_documents");
            let mut ids = self.submitted_ids.lock().unwrap();
            for record in records {
                ids.push(record.id().unwrap_or("").to_string());
            }
            Ok(TaskHandle(self.next_uid.fetch_add(1, Ordering::SeqCst)))
        }

        async fn get_task(&self, _handle: TaskHandle) -> Result<TaskStatus, SearchError> {
            self.record("get_task");
            Ok(TaskStatus::Succeeded)
        }

        async fn update_searchable_attributes(
            &self,
            attributes: &[&str],
        ) -> Result<TaskHandle, SearchError> {
            self.record("update_searchable_attributes");
            assert_eq!(attributes, SEARCHABLE_ATTRIBUTES);
            Ok(TaskHandle(100))
        }

        async fn update_filterable_attributes(
            &self,
            attributes: &[&str],
        ) -> Result<TaskHandle, SearchError> {
            self.record("update_filterable_attributes");
            assert_eq!(attributes, FILTERABLE_ATTRIBUTES);
            Ok(TaskHandle(101))
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn write_file(dir: &TempDir, name: &str, contents: &str) {
        let mut file = File::create(dir.path().join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.json", r#"{"title": "First"}"#);
        write_file(&dir, "b.json", r#"{"title": "Second", "content_id": "42"}"#);

        let client = Arc::new(RecordingEngineClient::new());
        let pipeline = IngestPipeline::new(client.clone(), dir.path());

        let report = pipeline.run().await.unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(*client.submitted_ids.lock().unwrap(), vec!["a", "42"]);
        assert_eq!(
            client.calls(),
            vec![
                "delete_index",
                "add_documents",
                "update_searchable_attributes",
                "update_filterable_attributes",
                "get_task",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rerun_over_unchanged_source_submits_same_ids() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.json", r#"{"title": "First"}"#);
        write_file(&dir, "b.json", r#"{"title": "Second", "content_id": "42"}"#);

        let client = Arc::new(RecordingEngineClient::new());
        let pipeline = IngestPipeline::new(client.clone(), dir.path());

        pipeline.run().await.unwrap();
        let first_ids = std::mem::take(&mut *client.submitted_ids.lock().unwrap());
        let first_calls = std::mem::take(&mut *client.calls.lock().unwrap());

        pipeline.run().await.unwrap();
        let second_ids = client.submitted_ids.lock().unwrap().clone();
        let second_calls = client.calls.lock().unwrap().clone();

        // Delete-then-reload keeps reruns from accumulating documents: the
        // second run deletes the index again and submits the same ids.
        assert_eq!(first_ids, vec!["a", "42"]);
        assert_eq!(second_ids, first_ids);
        assert_eq!(second_calls, first_calls);
        assert_eq!(second_calls[0], "delete_index");
    }

    #[tokio::test]
    async fn test_empty_source_never_touches_engine() {
        let dir = TempDir::new().unwrap();

        let client = Arc::new(RecordingEngineClient::new());
        let pipeline = IngestPipeline::new(client.clone(), dir.path());

        let report = pipeline.run().await.unwrap();

        assert_eq!(report, TrackingReport::default());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_only_unparsable_files_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "broken.json", "{nope");

        let client = Arc::new(RecordingEngineClient::new());
        let pipeline = IngestPipeline::new(client.clone(), dir.path());

        let report = pipeline.run().await.unwrap();

        assert_eq!(report, TrackingReport::default());
        assert!(client.calls().is_empty());
    }
}
