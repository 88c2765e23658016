//! Capability check gating document updates.
//!
//! There are no user accounts: holding a document's write token is the
//! entire authorization model. The token presented on an update is
//! compared against the one recorded in the document's metadata at
//! creation time — exact string equality, no normalization.

use crate::storage::{BlobStore, ObjectMeta, StoreError};

/// Outcome of the write-capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAccess {
    /// Token matches. Carries the stored metadata so the caller can
    /// re-attach it unchanged on the overwrite.
    Allow(ObjectMeta),
    /// Document exists but the presented token does not match.
    Deny,
    /// No document under this key.
    NotFound,
}

/// Check whether `presented` grants write access to the document stored
/// under `key`.
///
/// Read-only; the caller performs the overwrite. The window between this
/// check and that write is two separate backend calls and is not locked.
pub async fn authorize_write(
    store: &dyn BlobStore,
    key: &str,
    presented: &str,
) -> Result<WriteAccess, StoreError> {
    let Some(meta) = store.get_meta(key).await? else {
        return Ok(WriteAccess::NotFound);
    };
    if meta.write_token != presented {
        return Ok(WriteAccess::Deny);
    }
    Ok(WriteAccess::Allow(meta))
}
