//! Configuration and dependency wiring for the book indexer.

mod dependencies;

pub use dependencies::Dependencies;
