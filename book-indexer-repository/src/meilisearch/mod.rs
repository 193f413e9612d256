//! Meilisearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! over Meilisearch's REST API.

mod client;
mod index_settings;

pub use client::MeilisearchClient;
pub use index_settings::{IndexConfig, FILTERABLE_ATTRIBUTES, SEARCHABLE_ATTRIBUTES};
