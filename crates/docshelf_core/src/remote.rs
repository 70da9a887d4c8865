//! Remote blob store contract and its HTTP implementation.
//!
//! The remote store is authoritative for uploaded content. The catalog and
//! resolver talk to it exclusively through [`RemoteStore`], so tests can
//! substitute an in-memory implementation.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Document, NewFile};

/// Remote store failure modes.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not found")]
    NotFound,

    #[error("remote store returned {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Metadata echoed back by the store for each durably uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime: String,
}

/// Response body of the upload endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub uploaded: Vec<UploadReceipt>,
}

/// Response body of the single-document delete endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAck {
    pub ok: bool,
}

/// Response body of the bulk delete endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkDeleteAck {
    pub ok: bool,
    pub deleted: u64,
}

/// Client contract for the server's list/upload/download/delete surface.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// List stored documents, newest first.
    async fn list_documents(&self) -> Result<Vec<Document>, RemoteError>;

    /// Upload a batch of files. Partial success is permitted: every input
    /// either appears in the returned receipts or was not stored at all.
    async fn upload_documents(&self, files: &[NewFile]) -> Result<Vec<UploadReceipt>, RemoteError>;

    /// Download stored content by id.
    async fn download_document(
        &self,
        id: &str,
        force_attachment: bool,
    ) -> Result<Bytes, RemoteError>;

    /// Delete one document. Deleting an unknown id is not an error.
    async fn delete_document(&self, id: &str) -> Result<(), RemoteError>;

    /// Best-effort bulk delete. Returns the number of documents removed.
    async fn delete_all_documents(&self) -> Result<u64, RemoteError>;
}

/// [`RemoteStore`] implementation over the docshelf REST API.
pub struct HttpRemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteStore {
    /// Build a client for the store at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn error_for_response(res: reqwest::Response) -> RemoteError {
    let status = res.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return RemoteError::NotFound;
    }
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);
    RemoteError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_documents(&self) -> Result<Vec<Document>, RemoteError> {
        let res = self.client.get(self.url("/api/docs")).send().await?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        Ok(res.json().await?)
    }

    async fn upload_documents(&self, files: &[NewFile]) -> Result<Vec<UploadReceipt>, RemoteError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.to_vec())
                .file_name(file.name.clone())
                .mime_str(&file.mime)?;
            form = form.part("file", part);
        }

        let res = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        let body: UploadResponse = res.json().await?;
        Ok(body.uploaded)
    }

    async fn download_document(
        &self,
        id: &str,
        force_attachment: bool,
    ) -> Result<Bytes, RemoteError> {
        let mut req = self
            .client
            .get(self.url(&format!("/api/docs/{}/download", id)));
        if force_attachment {
            req = req.query(&[("download", "1")]);
        }
        let res = req.send().await?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        Ok(res.bytes().await?)
    }

    async fn delete_document(&self, id: &str) -> Result<(), RemoteError> {
        let res = self
            .client
            .delete(self.url(&format!("/api/docs/{}", id)))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        Ok(())
    }

    async fn delete_all_documents(&self) -> Result<u64, RemoteError> {
        let res = self.client.delete(self.url("/api/docs")).send().await?;
        if !res.status().is_success() {
            return Err(error_for_response(res).await);
        }
        let body: BulkDeleteAck = res.json().await?;
        Ok(body.deleted)
    }
}
