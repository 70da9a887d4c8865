//! Local persistence layer: metadata cache and binary blob store.
//!
//! Both live in one sled keyspace but use independent trees, so the metadata
//! cache stays metadata-only and blob content can be dropped without touching
//! the records.

/// Persistent binary store keyed by document id.
pub mod blob;
/// Durable metadata cache for the catalog list.
pub mod meta;

#[cfg(test)]
mod tests;

use crate::error::AppError;
use sled::Db;
use std::sync::Arc;

pub use blob::BlobStore;
pub use meta::MetaCache;

/// Handle to the local store with access to the underlying sled trees.
pub struct Store {
    pub db: Arc<Db>,
    pub meta: MetaCache,
    pub blobs: BlobStore,
}

impl Store {
    /// Open (or create) the store at `path`.
    ///
    /// # Errors
    /// Returns an error if the keyspace or one of its trees cannot be opened.
    pub fn open(path: &str) -> Result<Self, AppError> {
        let db = Arc::new(sled::open(path)?);
        let meta = MetaCache::new(&db)?;
        let blobs = BlobStore::new(&db)?;
        Ok(Self { db, meta, blobs })
    }

    /// Flush pending writes to disk.
    ///
    /// # Errors
    /// Returns an error if the underlying flush fails.
    pub fn flush(&self) -> Result<(), AppError> {
        self.db.flush()?;
        Ok(())
    }
}
