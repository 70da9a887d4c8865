//! Document HTTP handlers.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use docshelf_core::remote::{BulkDeleteAck, DeleteAck, UploadReceipt, UploadResponse};
use docshelf_core::{AppError, Document, NewFile};

use crate::{error::HttpError, AppState};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// List stored documents, newest first.
///
/// # Errors
/// Returns an error if the store scan fails.
pub async fn list_docs(State(state): State<AppState>) -> Result<Json<Vec<Document>>, HttpError> {
    Ok(Json(state.store.list()?))
}

/// Upload one or more files from a multipart form (repeated `file` fields).
///
/// Each file is stored independently; a file either appears in the returned
/// receipts or was not stored at all.
///
/// # Errors
/// Returns 400 when the form holds no files or a part cannot be read.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, HttpError> {
    let mut files: Vec<NewFile> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue; // ignore unknown fields
        }
        let name = field.file_name().map(str::to_string).unwrap_or_default();
        let mime = field.content_type().map(str::to_string).unwrap_or_default();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Read error: {}", e)))?;
        files.push(NewFile::new(name, mime, bytes));
    }

    if files.is_empty() {
        return Err(AppError::Validation("No files provided".to_string()).into());
    }

    let mut uploaded = Vec::new();
    for file in &files {
        let doc = state.store.insert(file)?;
        tracing::info!("Stored '{}' ({})", doc.name, doc.id);
        uploaded.push(UploadReceipt {
            id: doc.id,
            name: doc.name,
            size: doc.size,
            mime: doc.mime,
        });
    }

    Ok((StatusCode::CREATED, Json(UploadResponse { uploaded })).into_response())
}

/// Query parameters for the download endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct DownloadQuery {
    pub download: Option<String>,
}

/// Stream a stored document back to the client.
///
/// `?download=1` forces an attachment disposition; the default is inline.
/// Responses carry immutable cache headers keyed by the document id.
///
/// # Errors
/// Returns 404 for an unknown id.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, HttpError> {
    let doc = state.store.get_meta(&id)?.ok_or(AppError::NotFound)?;
    let bytes = state.store.get_blob(&id)?.ok_or(AppError::NotFound)?;

    let force_attachment = matches!(query.download.as_deref(), Some("1") | Some("true"));
    let disposition_type = if force_attachment {
        "attachment"
    } else {
        "inline"
    };

    let headers = [
        (header::CONTENT_TYPE, doc.mime.clone()),
        (
            header::CACHE_CONTROL,
            "public, max-age=31536000, immutable".to_string(),
        ),
        (header::ETAG, format!("\"{}\"", doc.id)),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "{}; filename=\"{}\"",
                disposition_type,
                urlencoding::encode(&doc.name)
            ),
        ),
    ];

    Ok((headers, bytes).into_response())
}

/// Delete one document. Deleting an already-deleted id succeeds.
///
/// # Errors
/// Returns an error if the removal itself fails.
pub async fn delete_doc(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, HttpError> {
    state.store.delete(&id)?;
    Ok(Json(DeleteAck { ok: true }))
}

/// Best-effort bulk delete of every stored document.
///
/// # Errors
/// Returns an error if the id scan fails.
pub async fn delete_all(State(state): State<AppState>) -> Result<Json<BulkDeleteAck>, HttpError> {
    let deleted = state.store.delete_all()?;
    Ok(Json(BulkDeleteAck { ok: true, deleted }))
}
