//! Search engine client trait definition.
//!
//! This module defines the abstract interface for the engine operations the
//! ingestion pipeline depends on, allowing for different backend
//! implementations (Meilisearch, mock, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use book_indexer_shared::{BookRecord, TaskHandle, TaskStatus};

/// Abstract interface for search engine operations.
///
/// Every write against the engine is asynchronous: the engine acknowledges
/// it with a [`TaskHandle`] and processes it in the background. Callers that
/// need completion follow the handle via [`get_task`](Self::get_task).
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Delete the target index.
    ///
    /// # Returns
    ///
    /// * `Ok(TaskHandle)` - Handle for the enqueued deletion
    /// * `Err(SearchError::IndexNotFound)` - If the index does not exist
    /// * `Err(SearchError)` - If the deletion fails for any other reason
    async fn delete_index(&self) -> Result<TaskHandle, SearchError>;

    /// Submit a batch of documents to the target index as one indexing
    /// operation.
    ///
    /// Documents sharing an identifier with an existing document replace it.
    ///
    /// # Arguments
    ///
    /// * `records` - The documents to index, each already carrying its
    ///   identifier under the primary key field
    /// * `primary_key` - Field the engine must treat as the primary key
    ///
    /// # Returns
    ///
    /// * `Ok(TaskHandle)` - Handle for the enqueued indexing task
    /// * `Err(SearchError)` - If the submission is rejected
    async fn add_documents(
        &self,
        records: &[BookRecord],
        primary_key: &str,
    ) -> Result<TaskHandle, SearchError>;

    /// Fetch the current status of an asynchronous task.
    ///
    /// # Returns
    ///
    /// * `Ok(TaskStatus)` - The task's status; failed tasks carry the
    ///   engine's error details
    /// * `Err(SearchError)` - If the status query itself fails
    async fn get_task(&self, handle: TaskHandle) -> Result<TaskStatus, SearchError>;

    /// Declare the ranked list of searchable fields on the target index.
    ///
    /// Idempotent; may be called on an index that does not exist yet (the
    /// engine creates it implicitly).
    async fn update_searchable_attributes(
        &self,
        attributes: &[&str],
    ) -> Result<TaskHandle, SearchError>;

    /// Declare the set of filterable fields on the target index.
    ///
    /// Idempotent, like
    /// [`update_searchable_attributes`](Self::update_searchable_attributes).
    async fn update_filterable_attributes(
        &self,
        attributes: &[&str],
    ) -> Result<TaskHandle, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
