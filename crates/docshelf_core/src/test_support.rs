//! In-memory remote store used by catalog and resolver tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{Document, NewFile};
use crate::remote::{RemoteError, RemoteStore, UploadReceipt};

/// Deterministic [`RemoteStore`] double with failure injection.
#[derive(Default)]
pub(crate) struct MockRemoteStore {
    docs: Mutex<Vec<Document>>,
    blobs: Mutex<HashMap<String, Bytes>>,
    reject_upload_names: Mutex<HashSet<String>>,
    fail_delete_ids: Mutex<HashSet<String>>,
    offline: AtomicBool,
    download_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MockRemoteStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Uploads for this file name are dropped from the receipts, simulating
    /// per-file storage failure within an otherwise successful batch.
    pub(crate) fn reject_uploads_named(&self, name: &str) {
        self.reject_upload_names
            .lock()
            .unwrap()
            .insert(name.to_string());
    }

    /// Deletes for this id fail with a server error.
    pub(crate) fn fail_deletes_for(&self, id: &str) {
        self.fail_delete_ids.lock().unwrap().insert(id.to_string());
    }

    /// Every call fails with a transport-level error from now on.
    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub(crate) fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stored_ids(&self) -> Vec<String> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.id.clone())
            .collect()
    }

    /// Seed a stored document directly, as if uploaded in a previous session.
    pub(crate) fn seed(&self, name: &str, mime: &str, bytes: Bytes) -> String {
        let id = self.assign_id();
        let doc = Document::synchronized(
            id.clone(),
            name.to_string(),
            bytes.len() as u64,
            mime.to_string(),
        );
        self.docs.lock().unwrap().insert(0, doc);
        self.blobs.lock().unwrap().insert(id.clone(), bytes);
        id
    }

    fn assign_id(&self) -> String {
        format!("remote-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn check_online(&self) -> Result<(), RemoteError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected {
                status: 503,
                message: "mock remote offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn list_documents(&self) -> Result<Vec<Document>, RemoteError> {
        self.check_online()?;
        Ok(self.docs.lock().unwrap().clone())
    }

    async fn upload_documents(&self, files: &[NewFile]) -> Result<Vec<UploadReceipt>, RemoteError> {
        self.check_online()?;
        let rejected = self.reject_upload_names.lock().unwrap().clone();
        let mut receipts = Vec::new();
        for file in files {
            if rejected.contains(&file.name) {
                continue;
            }
            let id = self.assign_id();
            let doc = Document::synchronized(
                id.clone(),
                file.name.clone(),
                file.size(),
                file.mime.clone(),
            );
            self.docs.lock().unwrap().insert(0, doc);
            self.blobs
                .lock()
                .unwrap()
                .insert(id.clone(), file.bytes.clone());
            receipts.push(UploadReceipt {
                id,
                name: file.name.clone(),
                size: file.size(),
                mime: file.mime.clone(),
            });
        }
        Ok(receipts)
    }

    async fn download_document(
        &self,
        id: &str,
        _force_attachment: bool,
    ) -> Result<Bytes, RemoteError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.blobs
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }

    async fn delete_document(&self, id: &str) -> Result<(), RemoteError> {
        self.check_online()?;
        if self.fail_delete_ids.lock().unwrap().contains(id) {
            return Err(RemoteError::Rejected {
                status: 500,
                message: "mock delete failure".to_string(),
            });
        }
        self.docs.lock().unwrap().retain(|d| d.id != id);
        self.blobs.lock().unwrap().remove(id);
        Ok(())
    }

    async fn delete_all_documents(&self) -> Result<u64, RemoteError> {
        self.check_online()?;
        let mut docs = self.docs.lock().unwrap();
        let deleted = docs.len() as u64;
        docs.clear();
        self.blobs.lock().unwrap().clear();
        Ok(deleted)
    }
}
