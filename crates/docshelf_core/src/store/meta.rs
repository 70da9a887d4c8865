//! Durable metadata cache backed by sled.
//!
//! The cache holds one value: the full ordered catalog list under a fixed
//! namespace key. The catalog rewrites it wholesale after every mutation
//! (write-through), so the persisted sequence never drifts ahead of or behind
//! the in-memory list.

use crate::{error::AppError, models::Document};
use sled::{Db, Tree};

const META_TREE_NAME: &str = "documents";
const CATALOG_KEY: &[u8] = b"docshelf:documents";

/// Accessor for the metadata cache tree.
#[derive(Clone)]
pub struct MetaCache {
    tree: Tree,
}

impl MetaCache {
    /// Open the metadata tree.
    ///
    /// # Errors
    /// Returns an error if the tree cannot be opened.
    pub fn new(db: &Db) -> Result<Self, AppError> {
        let tree = db.open_tree(META_TREE_NAME)?;
        Ok(Self { tree })
    }

    /// Replace the persisted catalog with `docs`, preserving order.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn write_all(&self, docs: &[Document]) -> Result<(), AppError> {
        let value = bincode::serialize(docs)?;
        self.tree.insert(CATALOG_KEY, value)?;
        Ok(())
    }

    /// Load the persisted catalog in stored order.
    ///
    /// # Returns
    /// The cached list; empty when nothing has been persisted yet.
    ///
    /// # Errors
    /// Returns an error if the read or deserialization fails.
    pub fn read_all(&self) -> Result<Vec<Document>, AppError> {
        match self.tree.get(CATALOG_KEY)? {
            Some(value) => Ok(bincode::deserialize(&value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Drop the persisted catalog entirely.
    ///
    /// # Errors
    /// Returns an error if the removal fails.
    pub fn clear(&self) -> Result<(), AppError> {
        self.tree.remove(CATALOG_KEY)?;
        Ok(())
    }
}
