//! Catalog service: the authoritative in-memory document list.
//!
//! All mutation goes through here. The catalog keeps the local metadata
//! cache in lockstep with the in-memory list (write-through after every
//! mutation) and reconciles with the remote store when one is configured.
//! Removal is local-first: the list and cache are updated even when the
//! remote side fails, and the remote failure is reported as a warning.


use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{Document, NewFile};
use crate::remote::RemoteStore;
use crate::resolver::{placeholder_file_name, placeholder_text, BlobResolver};
use crate::store::{MetaCache, Store};

/// One file that could not be added.
#[derive(Debug)]
pub struct UploadFailure {
    pub name: String,
    pub error: AppError,
}

/// Result of an `add` call: committed documents, per-file failures, and
/// warnings for already-applied effects (e.g. a failed cache write).
#[derive(Debug, Default)]
pub struct AddOutcome {
    pub added: Vec<Document>,
    pub failed: Vec<UploadFailure>,
    pub warnings: Vec<AppError>,
}

/// Result of a `remove` call. `removed` is `false` for an unknown id (a
/// no-op, not an error).
#[derive(Debug, Default)]
pub struct RemoveOutcome {
    pub removed: bool,
    pub warnings: Vec<AppError>,
}

/// Result of a `clear` call, aggregating per-document remote failures.
#[derive(Debug, Default)]
pub struct ClearOutcome {
    pub cleared: usize,
    pub warnings: Vec<AppError>,
}

/// Resolved content for a catalog document.
#[derive(Debug)]
pub enum Content {
    /// The document's actual bytes, from whichever tier answered.
    Original {
        bytes: Bytes,
        mime: String,
        file_name: String,
    },
    /// Synthesized metadata stand-in: the bytes are no longer resolvable.
    Placeholder { bytes: Bytes, file_name: String },
}

impl Content {
    pub fn bytes(&self) -> &Bytes {
        match self {
            Content::Original { bytes, .. } | Content::Placeholder { bytes, .. } => bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Content::Original { file_name, .. } | Content::Placeholder { file_name, .. } => {
                file_name
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Content::Placeholder { .. })
    }
}

/// The catalog service. One instance per running client.
pub struct Catalog {
    documents: RwLock<Vec<Document>>,
    cache: MetaCache,
    resolver: BlobResolver,
    remote: Option<Arc<dyn RemoteStore>>,
    store: Store,
    max_file_size: usize,
}

impl Catalog {
    /// Build a catalog over an open store, seeding the in-memory list from
    /// the metadata cache. An unreadable cache degrades to an empty list.
    pub fn new(store: Store, remote: Option<Arc<dyn RemoteStore>>, max_file_size: usize) -> Self {
        let documents = match store.meta.read_all() {
            Ok(docs) => docs,
            Err(err) => {
                tracing::warn!("Metadata cache unreadable, starting empty: {}", err);
                Vec::new()
            }
        };
        let cache = store.meta.clone();
        let resolver = BlobResolver::new(Some(store.blobs.clone()), remote.clone());
        Self {
            documents: RwLock::new(documents),
            cache,
            resolver,
            remote,
            store,
            max_file_size,
        }
    }

    /// Snapshot of the catalog in insertion order, newest first.
    pub async fn list(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    /// Add files to the catalog.
    ///
    /// With a remote store configured, bytes are uploaded before any record
    /// is committed; files the store did not accept fail with `UploadFailed`
    /// and leave no metadata behind, while accepted files adopt the
    /// store-assigned id. Without a remote store, records commit immediately
    /// under a client-generated id and bytes stay in the local tiers.
    ///
    /// # Errors
    /// `Validation` when `files` is empty; no state changes in that case.
    pub async fn add(&self, files: Vec<NewFile>) -> Result<AddOutcome, AppError> {
        if files.is_empty() {
            return Err(AppError::Validation("no files provided".to_string()));
        }

        let mut documents = self.documents.write().await;
        let mut outcome = AddOutcome::default();

        let mut pending: Vec<NewFile> = Vec::new();
        for file in files {
            if file.name.trim().is_empty() {
                outcome.failed.push(UploadFailure {
                    name: file.name.clone(),
                    error: AppError::Validation("empty file name".to_string()),
                });
            } else if file.bytes.len() > self.max_file_size {
                outcome.failed.push(UploadFailure {
                    name: file.name.clone(),
                    error: AppError::Validation(format!(
                        "file exceeds maximum of {} bytes",
                        self.max_file_size
                    )),
                });
            } else {
                pending.push(file);
            }
        }

        let committed = match &self.remote {
            Some(remote) if !pending.is_empty() => {
                self.upload_pending(remote.as_ref(), pending, &mut outcome)
                    .await
            }
            _ => pending
                .into_iter()
                .map(|file| {
                    let doc = Document::local(file.name.clone(), file.size(), file.mime.clone());
                    (doc, file.bytes)
                })
                .collect(),
        };

        for (doc, bytes) in committed {
            self.resolver.retain_session(&doc.id, bytes.clone());
            if self.remote.is_none() {
                self.resolver.persist_local(&doc.id, &bytes);
            }
            outcome.added.push(doc);
        }

        if !outcome.added.is_empty() {
            let mut next = outcome.added.clone();
            next.extend(documents.drain(..));
            *documents = next;
            self.persist_list(&documents, &mut outcome.warnings);
        }

        Ok(outcome)
    }

    async fn upload_pending(
        &self,
        remote: &dyn RemoteStore,
        pending: Vec<NewFile>,
        outcome: &mut AddOutcome,
    ) -> Vec<(Document, Bytes)> {
        let receipts = match remote.upload_documents(&pending).await {
            Ok(receipts) => receipts,
            Err(err) => {
                let reason = err.to_string();
                tracing::warn!("Upload batch failed: {}", reason);
                outcome.failed.extend(pending.into_iter().map(|file| UploadFailure {
                    name: file.name,
                    error: AppError::UploadFailed(reason.clone()),
                }));
                return Vec::new();
            }
        };

        // Partial success: inputs absent from the receipts were not stored.
        // Receipts are consumed by first matching name so duplicate names
        // pair up one-to-one.
        let mut receipts: Vec<Option<_>> = receipts.into_iter().map(Some).collect();
        let mut committed = Vec::new();
        for file in pending {
            let slot = receipts
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|r| r.name == file.name));
            match slot.and_then(Option::take) {
                Some(receipt) => {
                    let doc = Document::synchronized(
                        receipt.id,
                        file.name.clone(),
                        file.size(),
                        file.mime.clone(),
                    );
                    committed.push((doc, file.bytes));
                }
                None => {
                    outcome.failed.push(UploadFailure {
                        name: file.name,
                        error: AppError::UploadFailed(
                            "not accepted by the remote store".to_string(),
                        ),
                    });
                }
            }
        }
        committed
    }

    /// Remove one document, local-first.
    ///
    /// Unknown ids are a no-op. The local list, cache, and content tiers are
    /// always updated; a failed remote delete surfaces as a
    /// `RemoteDeleteFailed` warning and is never rolled back.
    pub async fn remove(&self, id: &str) -> RemoveOutcome {
        let mut documents = self.documents.write().await;
        let mut outcome = RemoveOutcome::default();

        let Some(pos) = documents.iter().position(|d| d.id == id) else {
            return outcome;
        };
        documents.remove(pos);
        outcome.removed = true;

        self.resolver.release(id);

        if let Some(remote) = &self.remote {
            if let Err(err) = remote.delete_document(id).await {
                tracing::warn!("Remote delete failed for '{}': {}", id, err);
                outcome.warnings.push(AppError::RemoteDeleteFailed {
                    id: id.to_string(),
                    reason: err.to_string(),
                });
            }
        }

        self.persist_list(&documents, &mut outcome.warnings);
        outcome
    }

    /// Remove every document. The caller is responsible for having confirmed
    /// this with the user beforehand.
    ///
    /// Remote deletion is best-effort per document; failures are aggregated
    /// as warnings and never block the remaining deletes or the local wipe.
    pub async fn clear(&self) -> ClearOutcome {
        let mut documents = self.documents.write().await;
        let drained: Vec<Document> = documents.drain(..).collect();
        let mut outcome = ClearOutcome {
            cleared: drained.len(),
            warnings: Vec::new(),
        };

        self.resolver.release_all();

        if let Some(remote) = &self.remote {
            for doc in &drained {
                if let Err(err) = remote.delete_document(&doc.id).await {
                    tracing::warn!("Remote delete failed for '{}': {}", doc.id, err);
                    outcome.warnings.push(AppError::RemoteDeleteFailed {
                        id: doc.id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        self.persist_list(&documents, &mut outcome.warnings);
        outcome
    }

    /// Resolve a document's content through the tiers, falling back to a
    /// metadata placeholder when every tier misses.
    ///
    /// # Errors
    /// `NotFound` when the id is not in the catalog at all.
    pub async fn resolve_content(&self, id: &str) -> Result<Content, AppError> {
        let doc = self
            .documents
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;

        match self.resolver.resolve(id).await {
            Some(bytes) => Ok(Content::Original {
                bytes,
                mime: doc.mime.clone(),
                file_name: doc.name.clone(),
            }),
            None => Ok(Content::Placeholder {
                bytes: Bytes::from(placeholder_text(&doc)),
                file_name: placeholder_file_name(&doc),
            }),
        }
    }

    /// Replace the catalog with the remote store's authoritative listing and
    /// rewrite the cache. Without a remote store this returns the current
    /// list unchanged.
    ///
    /// # Errors
    /// Propagates the remote listing failure; local state is untouched then.
    pub async fn refresh(&self) -> Result<Vec<Document>, AppError> {
        let Some(remote) = &self.remote else {
            return Ok(self.list().await);
        };

        let mut documents = self.documents.write().await;
        let listing = remote.list_documents().await?;
        *documents = listing;

        let mut warnings = Vec::new();
        self.persist_list(&documents, &mut warnings);
        Ok(documents.clone())
    }

    /// Import the outcome of a foreign file source selection.
    ///
    /// Items that failed to retrieve become warnings and never block the
    /// retrieved ones, which go through [`Catalog::add`]. An abandoned
    /// selection (no retrieved items) leaves the catalog untouched.
    pub async fn import(
        &self,
        items: Vec<Result<NewFile, AppError>>,
    ) -> Result<AddOutcome, AppError> {
        let mut files = Vec::new();
        let mut warnings = Vec::new();
        for item in items {
            match item {
                Ok(file) => files.push(file),
                Err(err) => {
                    tracing::warn!("Foreign source item failed: {}", err);
                    warnings.push(err);
                }
            }
        }

        if files.is_empty() {
            return Ok(AddOutcome {
                warnings,
                ..AddOutcome::default()
            });
        }

        let mut outcome = self.add(files).await?;
        outcome.warnings.splice(0..0, warnings);
        Ok(outcome)
    }

    /// Flush the underlying store to disk.
    ///
    /// # Errors
    /// Returns an error if the flush fails.
    pub fn flush(&self) -> Result<(), AppError> {
        self.store.flush()
    }

    fn persist_list(&self, documents: &[Document], warnings: &mut Vec<AppError>) {
        if let Err(err) = self.cache.write_all(documents) {
            tracing::warn!("Metadata cache write failed: {}", err);
            warnings.push(AppError::Persistence(err.to_string()));
        }
    }
}
