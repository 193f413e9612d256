//! Tracker module for the book indexer ingest.
//!
//! Polls outstanding engine tasks until every one reaches a terminal state
//! (`succeeded` or `failed`), aggregating the outcome. Failures are surfaced
//! with the engine's error details as they are discovered, exactly once per
//! task.
//!
//! There is no overall timeout: a task the engine never terminates is polled
//! indefinitely. Known limitation, deliberately not masked.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument};

use crate::errors::IngestError;
use book_indexer_repository::SearchEngineClient;
use book_indexer_shared::{TaskHandle, TaskStatus, TrackingReport};

/// Configuration for the task tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Pause between polling rounds (in milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3000,
        }
    }
}

/// Tracker that follows asynchronous engine tasks to completion.
pub struct TaskTracker {
    client: Arc<dyn SearchEngineClient>,
    config: TrackerConfig,
}

impl TaskTracker {
    /// Create a new tracker with the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            client,
            config: TrackerConfig::default(),
        }
    }

    /// Create a new tracker with custom configuration.
    pub fn with_config(client: Arc<dyn SearchEngineClient>, config: TrackerConfig) -> Self {
        Self { client, config }
    }

    /// Track a set of task handles until every one is terminal.
    ///
    /// Each round queries every unresolved handle; terminal outcomes are
    /// counted and dropped from the unresolved set, and a failed task logs
    /// the engine's code/message/link at that moment. Between rounds the
    /// tracker sleeps for the configured poll interval.
    ///
    /// An empty handle set completes immediately with a zero report. A
    /// status query failure (transport) aborts tracking.
    #[instrument(skip(self, handles), fields(task_count = handles.len()))]
    pub async fn track(&self, handles: &[TaskHandle]) -> Result<TrackingReport, IngestError> {
        let mut report = TrackingReport::default();
        if handles.is_empty() {
            return Ok(report);
        }

        info!(count = handles.len(), "Tracking indexing tasks");

        let mut unresolved: Vec<TaskHandle> = handles.to_vec();

        loop {
            let mut still_pending = Vec::with_capacity(unresolved.len());

            for handle in unresolved {
                match self.client.get_task(handle).await? {
                    TaskStatus::Succeeded => report.succeeded += 1,
                    TaskStatus::Failed(task_error) => {
                        report.failed += 1;
                        error!(
                            task_uid = %handle,
                            code = %task_error.code,
                            message = %task_error.message,
                            link = task_error.link.as_deref().unwrap_or(""),
                            "Indexing task failed"
                        );
                    }
                    TaskStatus::Pending => still_pending.push(handle),
                }
            }

            unresolved = still_pending;
            if unresolved.is_empty() {
                break;
            }

            info!(
                remaining = unresolved.len(),
                "Tasks still pending, rechecking after poll interval"
            );
            tokio::time::sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
        }

        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "Task tracking complete"
        );
        Ok(report)
    }

    /// Track a single task handle.
    ///
    /// Call-site convenience over [`track`](Self::track); behavior is
    /// identical to a one-element set.
    pub async fn track_one(&self, handle: TaskHandle) -> Result<TrackingReport, IngestError> {
        self.track(&[handle]).await
    }
}
