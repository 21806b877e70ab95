//! In-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::storage::{CartStore, StoreError};

/// Store that lives only as long as the process.
///
/// Clones share the same map, so a clone kept aside can observe what a cart
/// manager wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<FxHashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a single entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = FxHashMap::default();
        map.insert(key.into(), value.into());

        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.inner.write().await.insert(key.to_string(), value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn missing_key_is_none() -> TestResult {
        let store = MemoryStore::new();

        assert_eq!(store.get("cart").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn clones_share_entries() -> TestResult {
        let store = MemoryStore::with_entry("cart", "[]");
        let observer = store.clone();

        store.set("cart", "[1]".to_string()).await?;

        assert_eq!(observer.get("cart").await?.as_deref(), Some("[1]"));

        Ok(())
    }
}
