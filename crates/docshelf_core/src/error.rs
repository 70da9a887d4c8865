//! Application error types for catalog and storage logic.
use thiserror::Error;

use crate::remote::RemoteError;

/// Top-level application error type.
///
/// Mutation failures (`Validation`, `UploadFailed`) are returned to the
/// caller directly. `RemoteDeleteFailed` and `Persistence` describe effects
/// that were already applied locally; the catalog reports them as warnings on
/// the operation outcome instead of failing the operation.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Remote delete failed for '{id}': {reason}")]
    RemoteDeleteFailed { id: String, reason: String },

    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Not found")]
    NotFound,

    #[error("Metadata cache write failed: {0}")]
    Persistence(String),
}
