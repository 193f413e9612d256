//! Dependency initialization and wiring for the book indexer.

use std::env;
use std::sync::Arc;
use tracing::info;

use crate::IndexingError;
use book_indexer_ingest::IngestPipeline;
use book_indexer_repository::{IndexConfig, MeilisearchClient, SearchEngineClient};

/// Default search engine URL.
const DEFAULT_ENGINE_URL: &str = "http://localhost:7700";

/// Default uid of the target index.
const DEFAULT_INDEX_UID: &str = "ebooks";

/// Default directory holding the JSON book records.
const DEFAULT_DATA_DIR: &str = "./res";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured ingestion pipeline ready to run.
    pub pipeline: IngestPipeline,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MEILISEARCH_URL`: Engine URL (default: http://localhost:7700)
    /// - `MEILISEARCH_API_KEY`: API key sent as a bearer token (default: none)
    /// - `INDEX_UID`: Target index uid (default: ebooks)
    /// - `DATA_DIR`: Directory of JSON book records (default: ./res)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new() -> Result<Self, IndexingError> {
        let engine_url =
            env::var("MEILISEARCH_URL").unwrap_or_else(|_| DEFAULT_ENGINE_URL.to_string());
        let api_key = env::var("MEILISEARCH_API_KEY").ok();
        let index_uid = env::var("INDEX_UID").unwrap_or_else(|_| DEFAULT_INDEX_UID.to_string());
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());

        info!(
            engine_url = %engine_url,
            index_uid = %index_uid,
            data_dir = %data_dir,
            "Initializing dependencies"
        );

        let client = MeilisearchClient::new(&engine_url, api_key, IndexConfig::new(index_uid))
            .map_err(|e| {
                IndexingError::config(format!("Failed to create Meilisearch client: {}", e))
            })?;

        // Verify the engine is reachable before doing any work
        let healthy = client
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("Engine health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexingError::config("Search engine is unhealthy"));
        }

        info!("Search engine connection verified");

        let pipeline = IngestPipeline::new(Arc::new(client), data_dir);

        Ok(Self { pipeline })
    }
}
