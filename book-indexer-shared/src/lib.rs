//! # Book Indexer Shared
//!
//! Shared types for the book indexer system: the book record loaded from
//! disk, and the task types used to follow the engine's asynchronous
//! indexing operations to completion.

pub mod record;
pub mod task;

pub use record::BookRecord;
pub use task::{TaskError, TaskHandle, TaskStatus, TrackingReport};
