//! Search error types.
//!
//! This module defines the error types that can occur during engine operations.

use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    /// Failed to reach the search engine (transport/connectivity failure).
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The target index does not exist.
    ///
    /// Raised by index deletion; callers performing pre-run cleanup absorb
    /// this variant and nothing else.
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Index deletion failed for a reason other than absence.
    #[error("Index delete error: {0}")]
    DeleteError(String),

    /// A document batch submission was rejected.
    #[error("Document submit error: {0}")]
    SubmitError(String),

    /// Querying a task's status failed.
    #[error("Task query error: {0}")]
    TaskQueryError(String),

    /// Updating index settings failed.
    #[error("Settings error: {0}")]
    SettingsError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index-not-found error.
    pub fn index_not_found(msg: impl Into<String>) -> Self {
        Self::IndexNotFound(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a document submit error.
    pub fn submit(msg: impl Into<String>) -> Self {
        Self::SubmitError(msg.into())
    }

    /// Create a task query error.
    pub fn task_query(msg: impl Into<String>) -> Self {
        Self::TaskQueryError(msg.into())
    }

    /// Create a settings error.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::SettingsError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
