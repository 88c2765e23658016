//! Filesystem-backed blob store.
//!
//! One payload file per document at `<root>/<key>`, with the metadata
//! record in a JSON sidecar at `<root>/<key>.meta.json`. The sidecar is
//! written last, and a payload file without a sidecar is treated as
//! absent, so a half-created document is never visible to readers.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use super::{BlobStore, Object, ObjectMeta, StoreError};

const META_SUFFIX: &str = ".meta.json";
const MAX_KEY_LEN: usize = 128;

pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory must already exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Payload and sidecar paths for `key`, or `None` when the key could
    /// never have been issued. Path parameters arrive percent-decoded, so
    /// a traversal attempt like `..%2F..%2Fetc` reaches this function as
    /// `../../etc` and must fall out here, not hit the filesystem.
    fn paths(&self, key: &str) -> Option<(PathBuf, PathBuf)> {
        if key.is_empty() || key.len() > MAX_KEY_LEN {
            return None;
        }
        let valid = key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !valid {
            return None;
        }
        let payload = self.root.join(key);
        let meta = self.root.join(format!("{key}{META_SUFFIX}"));
        Some((payload, meta))
    }
}

async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl BlobStore for FsStore {
    async fn get(&self, key: &str) -> Result<Option<Object>, StoreError> {
        let Some((payload_path, meta_path)) = self.paths(key) else {
            return Ok(None);
        };
        let Some(raw_meta) = read_optional(&meta_path).await? else {
            return Ok(None);
        };
        let meta: ObjectMeta = serde_json::from_slice(&raw_meta)?;
        let Some(payload) = read_optional(&payload_path).await? else {
            return Ok(None);
        };
        Ok(Some(Object {
            payload: Bytes::from(payload),
            meta,
        }))
    }

    async fn get_meta(&self, key: &str) -> Result<Option<ObjectMeta>, StoreError> {
        let Some((_, meta_path)) = self.paths(key) else {
            return Ok(None);
        };
        let Some(raw) = read_optional(&meta_path).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    async fn put(&self, key: &str, payload: Bytes, meta: &ObjectMeta) -> Result<(), StoreError> {
        let Some((payload_path, meta_path)) = self.paths(key) else {
            return Err(StoreError::InvalidKey);
        };
        tokio::fs::write(&payload_path, &payload).await?;
        let encoded = serde_json::to_vec(meta)?;
        tokio::fs::write(&meta_path, encoded).await?;
        Ok(())
    }
}
