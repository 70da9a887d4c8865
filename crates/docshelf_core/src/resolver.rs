//! Tiered content resolution for catalog documents.
//!
//! Three tiers, tried in order: session handles held in memory, the local
//! blob store, and finally the remote store. Tier failures are demoted to
//! misses so resolution degrades one tier at a time; only full exhaustion is
//! reported to the caller, who falls back to a metadata placeholder.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::Document;
use crate::remote::RemoteStore;
use crate::store::BlobStore;
use crate::text::human_size;

/// Resolves document ids to byte content across the three storage tiers.
pub struct BlobResolver {
    session: Mutex<HashMap<String, Bytes>>,
    blobs: Option<BlobStore>,
    remote: Option<Arc<dyn RemoteStore>>,
}

impl BlobResolver {
    /// Build a resolver over the configured tiers. Either persistent tier may
    /// be absent; an ephemeral-only resolver is valid.
    pub fn new(blobs: Option<BlobStore>, remote: Option<Arc<dyn RemoteStore>>) -> Self {
        Self {
            session: Mutex::new(HashMap::new()),
            blobs,
            remote,
        }
    }

    fn session_tier(&self) -> MutexGuard<'_, HashMap<String, Bytes>> {
        // A poisoned session map only loses ephemeral handles; recover it.
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Keep an in-memory handle for the current session (tier 1).
    pub fn retain_session(&self, id: &str, bytes: Bytes) {
        self.session_tier().insert(id.to_string(), bytes);
    }

    /// Write content into the persistent local tier (tier 2), if present.
    pub fn persist_local(&self, id: &str, bytes: &Bytes) {
        if let Some(blobs) = &self.blobs {
            if let Err(err) = blobs.put(id, bytes) {
                tracing::warn!("Failed to persist blob for '{}': {}", id, err);
            }
        }
    }

    /// Resolve content for a document id, first tier that hits wins.
    ///
    /// A remote hit is cached into the session tier for the rest of the
    /// session, never into the local blob store. Tier errors are logged and
    /// treated as misses.
    ///
    /// # Returns
    /// The resolved bytes, or `None` once every tier has missed.
    pub async fn resolve(&self, id: &str) -> Option<Bytes> {
        if let Some(bytes) = self.session_tier().get(id).cloned() {
            return Some(bytes);
        }

        if let Some(blobs) = &self.blobs {
            match blobs.get(id) {
                Ok(Some(bytes)) => return Some(bytes),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("Local blob read failed for '{}': {}", id, err);
                }
            }
        }

        if let Some(remote) = &self.remote {
            match remote.download_document(id, false).await {
                Ok(bytes) => {
                    self.session_tier().insert(id.to_string(), bytes.clone());
                    return Some(bytes);
                }
                Err(err) => {
                    tracing::warn!("Remote fetch failed for '{}': {}", id, err);
                }
            }
        }

        None
    }

    /// Drop the content held for one document from both local tiers.
    pub fn release(&self, id: &str) {
        self.session_tier().remove(id);
        if let Some(blobs) = &self.blobs {
            if let Err(err) = blobs.remove(id) {
                tracing::warn!("Failed to delete blob for '{}': {}", id, err);
            }
        }
    }

    /// Drop all held content from both local tiers.
    pub fn release_all(&self) {
        self.session_tier().clear();
        if let Some(blobs) = &self.blobs {
            if let Err(err) = blobs.clear() {
                tracing::warn!("Failed to clear blob store: {}", err);
            }
        }
    }
}

/// Synthesize placeholder content describing a document whose bytes are no
/// longer resolvable. This is the degraded-mode contract for session-only or
/// stale records.
pub fn placeholder_text(doc: &Document) -> String {
    format!(
        "Docshelf\n\n\
         File: {}\n\
         Type: {}\n\
         Size: {}\n\
         Added: {}\n\n\
         Note: Local storage keeps metadata only. Re-upload the file to restore its content.\n",
        doc.name,
        doc.mime,
        human_size(doc.size),
        doc.date.to_rfc3339(),
    )
}

/// Download name for placeholder content: plain-text names stay as they are,
/// anything else gains an `.info.txt` suffix so the placeholder is not
/// mistaken for the original file.
pub fn placeholder_file_name(doc: &Document) -> String {
    if doc.name.ends_with(".txt") {
        doc.name.clone()
    } else {
        format!("{}.info.txt", doc.name)
    }
}
