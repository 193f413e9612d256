//! # Book Indexer Ingest
//!
//! This crate provides the components for bulk-loading book records from a
//! local directory into the search engine and following the engine's
//! asynchronous indexing tasks to completion.
//!
//! ## Architecture
//!
//! The ingest follows a Loader-Submitter-Tracker pattern:
//!
//! 1. **Loader**: Reads and parses book records from disk, assigning each
//!    an engine-safe identifier
//! 2. **Submitter**: Partitions records into batches and submits each as
//!    one asynchronous indexing task
//! 3. **Tracker**: Polls outstanding tasks until every one reaches a
//!    terminal state, aggregating the outcome
//! 4. **Orchestrator**: Coordinates the ingest flow end to end

pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod resolver;
pub mod submitter;
pub mod tracker;

pub use errors::IngestError;
pub use orchestrator::IngestPipeline;
