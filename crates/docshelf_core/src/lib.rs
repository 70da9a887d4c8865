//! Core domain library for docshelf (catalog, storage tiers, search, remote
//! store client).

/// Catalog service and mutation outcomes.
pub mod catalog;
/// Configuration loading and defaults.
pub mod config;
/// Application error types.
pub mod error;
/// Data models for catalog records and uploads.
pub mod models;
/// Remote blob store contract and HTTP client.
pub mod remote;
/// Tiered content resolution.
pub mod resolver;
/// Local metadata cache and blob store.
pub mod store;
/// Search, ranking, and category grouping.
pub mod search;
/// Text formatting helpers.
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{AddOutcome, Catalog, ClearOutcome, Content, RemoveOutcome};
pub use config::{Config, DEFAULT_MAX_FILE_SIZE, DEFAULT_PORT};
pub use error::AppError;
pub use models::{Document, NewFile, FALLBACK_MIME};
pub use remote::{HttpRemoteStore, RemoteError, RemoteStore};
pub use store::Store;
