//! HTTP request handlers.

/// Document endpoints: list, upload, download, delete.
pub mod docs;
