//! # Book Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search engine. It includes definitions for errors, interfaces, and a
//! concrete implementation for Meilisearch.

pub mod errors;
pub mod interfaces;
pub mod meilisearch;

pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use meilisearch::{IndexConfig, MeilisearchClient};
