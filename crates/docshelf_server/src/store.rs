//! Server-side document blob store backed by sled.
//!
//! Metadata rows and raw content live in separate trees keyed by the
//! store-assigned document id; the listing is ordered newest first.

use bytes::Bytes;
use docshelf_core::{models::NewFile, AppError, Document};
use sled::{Db, Tree};
use std::sync::Arc;
use uuid::Uuid;

const FILES_TREE_NAME: &str = "files";
const FILE_BLOBS_TREE_NAME: &str = "file_blobs";

/// Durable blob store behind the REST surface.
pub struct FileStore {
    db: Arc<Db>,
    files: Tree,
    blobs: Tree,
}

impl FileStore {
    /// Open (or create) the store at `path`.
    ///
    /// # Errors
    /// Returns an error if the keyspace or a tree cannot be opened.
    pub fn open(path: &str) -> Result<Self, AppError> {
        let db = Arc::new(sled::open(path)?);
        let files = db.open_tree(FILES_TREE_NAME)?;
        let blobs = db.open_tree(FILE_BLOBS_TREE_NAME)?;
        Ok(Self { db, files, blobs })
    }

    /// Store an uploaded file under a fresh id.
    ///
    /// The blob is written before the metadata row, so a failure cannot leave
    /// a listed document without content.
    ///
    /// # Errors
    /// Returns an error if serialization or a write fails.
    pub fn insert(&self, file: &NewFile) -> Result<Document, AppError> {
        let doc = Document::synchronized(
            Uuid::new_v4().to_string(),
            file.name.clone(),
            file.size(),
            file.mime.clone(),
        );
        self.blobs.insert(doc.id.as_bytes(), file.bytes.as_ref())?;
        let row = bincode::serialize(&doc)?;
        self.files.insert(doc.id.as_bytes(), row)?;
        Ok(doc)
    }

    /// List stored documents, newest first.
    ///
    /// # Errors
    /// Returns an error if a row cannot be read or decoded.
    pub fn list(&self) -> Result<Vec<Document>, AppError> {
        let mut docs = Vec::new();
        for entry in self.files.iter() {
            let (_, value) = entry?;
            docs.push(bincode::deserialize::<Document>(&value)?);
        }
        docs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(docs)
    }

    /// Fetch one document's metadata row.
    ///
    /// # Errors
    /// Returns an error if the lookup or decoding fails.
    pub fn get_meta(&self, id: &str) -> Result<Option<Document>, AppError> {
        match self.files.get(id.as_bytes())? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    /// Fetch one document's raw content.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    pub fn get_blob(&self, id: &str) -> Result<Option<Bytes>, AppError> {
        Ok(self
            .blobs
            .get(id.as_bytes())?
            .map(|value| Bytes::copy_from_slice(&value)))
    }

    /// Delete one document. Unknown ids are a no-op.
    ///
    /// # Returns
    /// `true` if a metadata row was removed.
    ///
    /// # Errors
    /// Returns an error if a removal fails.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.blobs.remove(id.as_bytes())?;
        Ok(self.files.remove(id.as_bytes())?.is_some())
    }

    /// Best-effort bulk delete.
    ///
    /// # Returns
    /// Number of documents whose metadata row was removed.
    ///
    /// # Errors
    /// Returns an error only if the id scan itself fails; individual delete
    /// failures are logged and skipped.
    pub fn delete_all(&self) -> Result<u64, AppError> {
        let ids: Vec<String> = self
            .files
            .iter()
            .keys()
            .filter_map(|key| key.ok())
            .map(|key| String::from_utf8_lossy(&key).to_string())
            .collect();

        let mut deleted = 0u64;
        for id in ids {
            match self.delete(&id) {
                Ok(true) => deleted += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!("Failed to delete '{}' during bulk delete: {}", id, err);
                }
            }
        }
        Ok(deleted)
    }

    /// Flush pending writes to disk.
    ///
    /// # Errors
    /// Returns an error if the flush fails.
    pub fn flush(&self) -> Result<(), AppError> {
        self.db.flush()?;
        Ok(())
    }
}
