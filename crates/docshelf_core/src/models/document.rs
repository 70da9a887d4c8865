//! Document metadata records and upload inputs.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// MIME type recorded when a file arrives without one.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Document metadata stored in the catalog, the local metadata cache, and
/// returned by the server API.
///
/// This is metadata only. Byte content lives in the resolver tiers, keyed by
/// `id`, so a record here is valid whether or not its bytes are currently
/// resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime: String,
    pub date: DateTime<Utc>,
}

impl Document {
    /// Create a record with a client-generated id, used when no remote store
    /// is configured. Once a record syncs with a remote store it carries the
    /// store-assigned id instead.
    pub fn local(name: String, size: u64, mime: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            size,
            mime: normalize_mime(mime),
            date: Utc::now(),
        }
    }

    /// Create a record keyed by a store-assigned id after a successful upload.
    pub fn synchronized(id: String, name: String, size: u64, mime: String) -> Self {
        Self {
            id,
            name,
            size,
            mime: normalize_mime(mime),
            date: Utc::now(),
        }
    }
}

/// A file selected for upload: display name, MIME type, and raw bytes.
///
/// This is also the shape a foreign file source yields per retrieved item.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl NewFile {
    /// Build an upload input, substituting [`FALLBACK_MIME`] for a missing or
    /// blank MIME type.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            mime: normalize_mime(mime.into()),
            bytes,
        }
    }

    /// Byte length of the file content.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn normalize_mime(mime: String) -> String {
    if mime.trim().is_empty() {
        FALLBACK_MIME.to_string()
    } else {
        mime
    }
}
