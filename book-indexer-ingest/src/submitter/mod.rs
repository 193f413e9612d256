//! Submitter module for the book indexer ingest.
//!
//! Partitions the loaded records into fixed-size batches and submits each
//! batch to the engine as one asynchronous indexing task. Before the first
//! submission the target index is deleted so every run starts clean instead
//! of accumulating stale documents; an absent index is not an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::errors::IngestError;
use book_indexer_repository::{SearchEngineClient, SearchError};
use book_indexer_shared::{record::ID_FIELD, BookRecord, TaskHandle};

/// Configuration for the batch submitter.
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Maximum number of records per submitted batch.
    pub batch_size: usize,
    /// Pause between consecutive batch submissions (in milliseconds).
    ///
    /// Pure request-rate pacing; batches are independent and the delay is
    /// never applied after the last one.
    pub inter_batch_delay_ms: u64,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            inter_batch_delay_ms: 500,
        }
    }
}

/// Submitter that loads record batches into the search engine.
///
/// Batches partition the input in its original order, one task handle per
/// batch, in batch order.
pub struct BatchSubmitter {
    client: Arc<dyn SearchEngineClient>,
    config: SubmitterConfig,
}

impl BatchSubmitter {
    /// Create a new submitter with the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            client,
            config: SubmitterConfig::default(),
        }
    }

    /// Create a new submitter with custom configuration.
    pub fn with_config(client: Arc<dyn SearchEngineClient>, config: SubmitterConfig) -> Self {
        Self { client, config }
    }

    /// Submit all records in batches, returning one task handle per batch.
    ///
    /// An empty input short-circuits: no engine call is made and an empty
    /// handle list is returned.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn submit(&self, records: &[BookRecord]) -> Result<Vec<TaskHandle>, IngestError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        self.clean_index().await?;

        let total_batches = (records.len() + self.config.batch_size - 1) / self.config.batch_size;
        let mut handles = Vec::with_capacity(total_batches);

        for (i, batch) in records.chunks(self.config.batch_size).enumerate() {
            let batch_num = i + 1;
            info!(
                batch = batch_num,
                total = total_batches,
                size = batch.len(),
                "Submitting batch"
            );

            let handle = self.client.add_documents(batch, ID_FIELD).await?;
            info!(batch = batch_num, task_uid = %handle, "Batch enqueued");
            handles.push(handle);

            if batch_num < total_batches {
                tokio::time::sleep(Duration::from_millis(self.config.inter_batch_delay_ms)).await;
            }
        }

        info!(
            records = records.len(),
            batches = handles.len(),
            "Submission complete"
        );
        Ok(handles)
    }

    /// Delete the target index so the run starts from a clean state.
    ///
    /// Only absence of the index is absorbed; any other delete failure
    /// (connectivity, auth) propagates and aborts the run.
    async fn clean_index(&self) -> Result<(), IngestError> {
        match self.client.delete_index().await {
            Ok(handle) => {
                debug!(task_uid = %handle, "Existing index deletion enqueued");
                Ok(())
            }
            Err(SearchError::IndexNotFound(_)) => {
                debug!("No existing index to delete");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use book_indexer_shared::TaskStatus;
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock engine client recording submission traffic.
    struct MockEngineClient {
        delete_calls: AtomicUsize,
        delete_result: Option<SearchError>,
        batch_sizes: Mutex<Vec<usize>>,
        next_uid: AtomicU64,
    }

    impl MockEngineClient {
        fn new() -> Self {
            Self {
                delete_calls: AtomicUsize::new(0),
                delete_result: None,
                batch_sizes: Mutex::new(Vec::new()),
                next_uid: AtomicU64::new(1),
            }
        }

        fn with_delete_error(error: SearchError) -> Self {
            Self {
                delete_result: Some(error),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchEngineClient for MockEngineClient {
        async fn delete_index(&self) -> Result<TaskHandle, SearchError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            match &self.delete_result {
                Some(error) => Err(error.clone()),
                None => Ok(TaskHandle(0)),
            }
        }

        async fn add_documents(
            &self,
            records: &[BookRecord],
            primary_key: &str,
        ) -> Result<TaskHandle, SearchError> {
            assert_eq!(primary_key, "id");
            self.batch_sizes.lock().unwrap().push(records.len());
            Ok(TaskHandle(self.next_uid.fetch_add(1, Ordering::SeqCst)))
        }

        async fn get_task(&self, _handle: TaskHandle) -> Result<TaskStatus, SearchError> {
            Ok(TaskStatus::Succeeded)
        }

        async fn update_searchable_attributes(
            &self,
            _attributes: &[&str],
        ) -> Result<TaskHandle, SearchError> {
            Ok(TaskHandle(0))
        }

        async fn update_filterable_attributes(
            &self,
            _attributes: &[&str],
        ) -> Result<TaskHandle, SearchError> {
            Ok(TaskHandle(0))
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn records(count: usize) -> Vec<BookRecord> {
        (0..count)
            .map(|i| {
                let fields = match json!({"title": format!("Book {}", i)}) {
                    serde_json::Value::Object(map) => map,
                    _ => unreachable!(),
                };
                let mut record = BookRecord::new(format!("book_{:03}.json", i), fields);
                record.set_id(format!("book_{:03}", i));
                record
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_batches_partition_input() {
        let client = Arc::new(MockEngineClient::new());
        let submitter = BatchSubmitter::with_config(
            client.clone(),
            SubmitterConfig {
                batch_size: 3,
                inter_batch_delay_ms: 500,
            },
        );

        let handles = submitter.submit(&records(7)).await.unwrap();

        // ceil(7/3) batches, last one short, handles in batch order.
        assert_eq!(handles, vec![TaskHandle(1), TaskHandle(2), TaskHandle(3)]);
        assert_eq!(*client.batch_sizes.lock().unwrap(), vec![3, 3, 1]);
        assert_eq!(client.delete_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exact_multiple_has_no_short_batch() {
        let client = Arc::new(MockEngineClient::new());
        let submitter = BatchSubmitter::with_config(
            client.clone(),
            SubmitterConfig {
                batch_size: 2,
                inter_batch_delay_ms: 500,
            },
        );

        let handles = submitter.submit(&records(4)).await.unwrap();

        assert_eq!(handles.len(), 2);
        assert_eq!(*client.batch_sizes.lock().unwrap(), vec![2, 2]);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_engine_call() {
        let client = Arc::new(MockEngineClient::new());
        let submitter = BatchSubmitter::new(client.clone());

        let handles = submitter.submit(&[]).await.unwrap();

        assert!(handles.is_empty());
        assert_eq!(client.delete_calls.load(Ordering::SeqCst), 0);
        assert!(client.batch_sizes.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_index_on_delete_is_absorbed() {
        let client = Arc::new(MockEngineClient::with_delete_error(
            SearchError::index_not_found("ebooks"),
        ));
        let submitter = BatchSubmitter::new(client.clone());

        let handles = submitter.submit(&records(1)).await.unwrap();
        assert_eq!(handles.len(), 1);
    }

    #[tokio::test]
    async fn test_other_delete_error_propagates() {
        let client = Arc::new(MockEngineClient::with_delete_error(
            SearchError::connection("connection refused"),
        ));
        let submitter = BatchSubmitter::new(client.clone());

        let result = submitter.submit(&records(1)).await;

        assert!(matches!(
            result,
            Err(IngestError::SearchError(SearchError::ConnectionError(_)))
        ));
        assert!(client.batch_sizes.lock().unwrap().is_empty());
    }
}
