//! Blob store adapter.
//!
//! Documents are opaque byte payloads with a small typed metadata record
//! attached. The [`BlobStore`] trait is the seam between the HTTP handlers
//! and whatever actually holds the bytes: [`FsStore`] for a real data
//! directory, [`MemoryStore`] for tests and development.

pub mod fs;
pub mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Metadata attached to a stored document.
///
/// Serialized with kebab-case wire names (`write-token`, `content-type`).
/// The write token recorded here at creation time is the sole update
/// capability for the document and never changes afterwards; the
/// content-type label is likewise fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(rename = "write-token")]
    pub write_token: String,
    #[serde(rename = "content-type")]
    pub content_type: String,
}

/// A stored document: payload bytes plus attached metadata.
#[derive(Debug, Clone)]
pub struct Object {
    pub payload: Bytes,
    pub meta: ObjectMeta,
}

/// Errors surfaced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata encoding failed: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Write attempted under a key the service could never have issued.
    #[error("invalid object key")]
    InvalidKey,
}

/// Key/value object storage with per-object metadata.
///
/// Absent keys are `Ok(None)`, not errors; `Err` means the backend itself
/// failed. `put` takes the metadata on every call — backends are not
/// trusted to preserve it across an overwrite.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a document and its metadata.
    async fn get(&self, key: &str) -> Result<Option<Object>, StoreError>;

    /// Fetch only the metadata record for a document.
    async fn get_meta(&self, key: &str) -> Result<Option<ObjectMeta>, StoreError>;

    /// Write (or overwrite) a document together with its metadata.
    async fn put(&self, key: &str, payload: Bytes, meta: &ObjectMeta) -> Result<(), StoreError>;
}
