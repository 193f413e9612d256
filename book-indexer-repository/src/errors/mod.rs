//! Error types for the book indexer repository.

mod search_error;

pub use search_error::SearchError;
