//! In-memory blob store for tests and development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{BlobStore, Object, ObjectMeta, StoreError};

/// HashMap-backed store. `Clone` is cheap and clones share the same
/// underlying map, so a test can keep a handle for inspection while the
/// server holds another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<RwLock<HashMap<String, Object>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Object>, StoreError> {
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn get_meta(&self, key: &str) -> Result<Option<ObjectMeta>, StoreError> {
        Ok(self.objects.read().await.get(key).map(|o| o.meta.clone()))
    }

    async fn put(&self, key: &str, payload: Bytes, meta: &ObjectMeta) -> Result<(), StoreError> {
        let object = Object {
            payload,
            meta: meta.clone(),
        };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(token: &str) -> ObjectMeta {
        ObjectMeta {
            write_token: token.to_string(),
            content_type: "text/json".to_string(),
        }
    }

    #[tokio::test]
    async fn get_returns_what_put_stored() {
        let store = MemoryStore::new();
        store
            .put("k1", Bytes::from_static(b"payload"), &meta("w1"))
            .await
            .unwrap();

        let object = store.get("k1").await.unwrap().unwrap();
        assert_eq!(object.payload, Bytes::from_static(b"payload"));
        assert_eq!(object.meta.write_token, "w1");

        assert!(store.get("k2").await.unwrap().is_none());
        assert!(store.get_meta("k2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces_payload() {
        let store = MemoryStore::new();
        store
            .put("k1", Bytes::from_static(b"old"), &meta("w1"))
            .await
            .unwrap();
        store
            .put("k1", Bytes::from_static(b"new"), &meta("w1"))
            .await
            .unwrap();

        let object = store.get("k1").await.unwrap().unwrap();
        assert_eq!(object.payload, Bytes::from_static(b"new"));
    }

    #[tokio::test]
    async fn clones_share_the_same_map() {
        let a = MemoryStore::new();
        let b = a.clone();

        a.put("k1", Bytes::from_static(b"x"), &meta("w1"))
            .await
            .unwrap();
        assert!(b.get("k1").await.unwrap().is_some());
    }
}
