//! Data models shared by the catalog, resolver, and wire contract.

/// Document records and upload inputs.
pub mod document;

#[cfg(test)]
mod tests;

pub use document::{Document, NewFile, FALLBACK_MIME};
