//! Task types for asynchronous indexing operations.
//!
//! The engine acknowledges every write with a task uid and processes it in
//! the background; these types model the handle, its observed status, and
//! the aggregate outcome of a tracking run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to an in-flight asynchronous engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error details reported by the engine for a failed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskError {
    /// Engine error code (e.g. `invalid_document_id`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Link to the engine's documentation for this error, when provided.
    pub link: Option<String>,
}

/// Observed status of an asynchronous engine task.
///
/// `Pending` subsumes every non-terminal state the engine reports
/// (enqueued, processing, and anything it may add later).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// The task has not reached a terminal state yet.
    Pending,
    /// The task completed successfully.
    Succeeded,
    /// The task failed; the engine's error details are attached.
    Failed(TaskError),
}

impl TaskStatus {
    /// Whether this status is terminal (polling stops once reached).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }
}

/// Final tally of a tracking run over a set of task handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackingReport {
    /// Number of tasks that reached `succeeded`.
    pub succeeded: usize,
    /// Number of tasks that reached `failed`.
    pub failed: usize,
}

impl TrackingReport {
    /// Whether any tracked task failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Total number of tasks that reached a terminal state.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(TaskStatus::Succeeded.is_terminal());
        assert!(TaskStatus::Failed(TaskError {
            code: "index_not_found".to_string(),
            message: "Index `ebooks` not found.".to_string(),
            link: None,
        })
        .is_terminal());
    }

    #[test]
    fn test_report_tally() {
        let report = TrackingReport {
            succeeded: 2,
            failed: 1,
        };
        assert!(report.has_failures());
        assert_eq!(report.total(), 3);

        assert!(!TrackingReport::default().has_failures());
    }
}
