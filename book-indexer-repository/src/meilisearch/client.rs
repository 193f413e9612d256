//! Meilisearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! over Meilisearch's REST API using a plain HTTP client. Every write
//! endpoint answers with an enqueued task; completion is observed through
//! the tasks endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::meilisearch::index_settings::IndexConfig;
use book_indexer_shared::{BookRecord, TaskError, TaskHandle, TaskStatus};

/// Task acknowledgment returned by every write endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnqueuedTask {
    task_uid: u64,
}

/// Task body returned by the tasks endpoint.
#[derive(Debug, Deserialize)]
struct TaskView {
    status: String,
    #[serde(default)]
    error: Option<TaskErrorView>,
}

/// Error object attached to a failed task.
#[derive(Debug, Deserialize)]
struct TaskErrorView {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    link: Option<String>,
}

impl From<TaskView> for TaskStatus {
    fn from(view: TaskView) -> Self {
        match view.status.as_str() {
            "succeeded" => TaskStatus::Succeeded,
            "failed" => {
                let error = view.error.unwrap_or(TaskErrorView {
                    code: String::new(),
                    message: String::new(),
                    link: None,
                });
                TaskStatus::Failed(TaskError {
                    code: error.code,
                    message: error.message,
                    link: error.link,
                })
            }
            // enqueued, processing, and anything the engine adds later
            _ => TaskStatus::Pending,
        }
    }
}

/// Meilisearch client implementation.
///
/// Speaks the engine's REST API directly: `/indexes/{uid}` for index
/// lifecycle, `/indexes/{uid}/documents` for batch submission,
/// `/indexes/{uid}/settings/*` for attribute declarations, and
/// `/tasks/{uid}` for task status.
///
/// # Example
///
/// ```ignore
/// let config = IndexConfig::new("ebooks");
/// let client = MeilisearchClient::new("http://localhost:7700", None, config)?;
/// let handle = client.add_documents(&records, "id").await?;
/// ```
pub struct MeilisearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    index: IndexConfig,
}

impl MeilisearchClient {
    /// Create a new client for the engine at the given URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The engine base URL (e.g. "http://localhost:7700")
    /// * `api_key` - Optional API key sent as a bearer token
    /// * `index` - The target index configuration
    ///
    /// # Returns
    ///
    /// * `Ok(MeilisearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid
    pub fn new(
        url: &str,
        api_key: Option<String>,
        index: IndexConfig,
    ) -> Result<Self, SearchError> {
        Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        info!(url = %url, index_uid = %index.uid, "Created Meilisearch client");

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            api_key,
            index,
        })
    }

    /// Endpoint path under the target index.
    fn index_url(&self, path: &str) -> String {
        format!("{}/indexes/{}{}", self.base_url, self.index.uid, path)
    }

    /// Attach the bearer token when an API key is configured.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Extract the enqueued task handle from a successful write response.
    async fn enqueued_handle(response: reqwest::Response) -> Result<TaskHandle, SearchError> {
        let task: EnqueuedTask = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        Ok(TaskHandle(task.task_uid))
    }
}

#[async_trait]
impl SearchEngineClient for MeilisearchClient {
    async fn delete_index(&self) -> Result<TaskHandle, SearchError> {
        let response = self
            .authorize(self.http.delete(self.index_url("")))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(SearchError::index_not_found(self.index.uid.clone()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Index delete request failed");
            return Err(SearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, body
            )));
        }

        let handle = Self::enqueued_handle(response).await?;
        debug!(task_uid = %handle, "Index deletion enqueued");
        Ok(handle)
    }

    async fn add_documents(
        &self,
        records: &[BookRecord],
        primary_key: &str,
    ) -> Result<TaskHandle, SearchError> {
        let url = self.index_url("/documents");
        let response = self
            .authorize(self.http.post(&url).query(&[("primaryKey", primary_key)]))
            .json(records)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Document submission failed");
            return Err(SearchError::submit(format!(
                "Submit failed with status {}: {}",
                status, body
            )));
        }

        let handle = Self::enqueued_handle(response).await?;
        debug!(task_uid = %handle, count = records.len(), "Document batch enqueued");
        Ok(handle)
    }

    async fn get_task(&self, handle: TaskHandle) -> Result<TaskStatus, SearchError> {
        let url = format!("{}/tasks/{}", self.base_url, handle);
        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::task_query(format!(
                "Task query failed with status {}: {}",
                status, body
            )));
        }

        let view: TaskView = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        Ok(view.into())
    }

    async fn update_searchable_attributes(
        &self,
        attributes: &[&str],
    ) -> Result<TaskHandle, SearchError> {
        self.update_settings("/settings/searchable-attributes", attributes)
            .await
    }

    async fn update_filterable_attributes(
        &self,
        attributes: &[&str],
    ) -> Result<TaskHandle, SearchError> {
        self.update_settings("/settings/filterable-attributes", attributes)
            .await
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

impl MeilisearchClient {
    /// Replace one settings list on the target index.
    async fn update_settings(
        &self,
        path: &str,
        attributes: &[&str],
    ) -> Result<TaskHandle, SearchError> {
        let response = self
            .authorize(self.http.put(self.index_url(path)))
            .json(attributes)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, path = %path, body = %body, "Settings update failed");
            return Err(SearchError::settings(format!(
                "Settings update failed with status {}: {}",
                status, body
            )));
        }

        let handle = Self::enqueued_handle(response).await?;
        debug!(task_uid = %handle, path = %path, "Settings update enqueued");
        Ok(handle)
    }
}
