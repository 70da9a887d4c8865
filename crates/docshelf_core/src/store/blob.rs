//! Persistent binary store keyed by document id.
//!
//! Second resolver tier. Independent tree from the metadata cache; deleting a
//! blob never touches the corresponding record and vice versa.

use crate::error::AppError;
use bytes::Bytes;
use sled::{Db, Tree};

const BLOB_TREE_NAME: &str = "blobs";

/// Accessor for the blob tree.
#[derive(Clone)]
pub struct BlobStore {
    tree: Tree,
}

impl BlobStore {
    /// Open the blob tree.
    ///
    /// # Errors
    /// Returns an error if the tree cannot be opened.
    pub fn new(db: &Db) -> Result<Self, AppError> {
        let tree = db.open_tree(BLOB_TREE_NAME)?;
        Ok(Self { tree })
    }

    /// Store raw content under a document id, replacing any existing entry.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn put(&self, id: &str, bytes: &Bytes) -> Result<(), AppError> {
        self.tree.insert(id.as_bytes(), bytes.as_ref())?;
        Ok(())
    }

    /// Fetch raw content by document id.
    ///
    /// # Returns
    /// The stored bytes if present.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    pub fn get(&self, id: &str) -> Result<Option<Bytes>, AppError> {
        Ok(self
            .tree
            .get(id.as_bytes())?
            .map(|value| Bytes::copy_from_slice(&value)))
    }

    /// Remove the entry for a document id.
    ///
    /// # Returns
    /// `true` if an entry was removed.
    ///
    /// # Errors
    /// Returns an error if the removal fails.
    pub fn remove(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.tree.remove(id.as_bytes())?.is_some())
    }

    /// Remove every stored blob.
    ///
    /// # Errors
    /// Returns an error if the tree cannot be cleared.
    pub fn clear(&self) -> Result<(), AppError> {
        self.tree.clear()?;
        Ok(())
    }
}
