//! Node-local in-memory store backend.
//!
//! One node's view of a replicated map: read-your-own-write locally,
//! with replication left to a real backend. Standalone daemons and
//! tests use it directly.

use crate::EcStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory [`EcStore`] implementation.
#[derive(Debug)]
pub struct MemoryStore<V> {
    name: Option<String>,
    inner: RwLock<HashMap<String, V>>,
}

impl<V> MemoryStore<V> {
    /// Creates an anonymous store.
    pub fn new() -> Self {
        Self {
            name: None,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store carrying its cluster-wide map name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// The cluster-wide map name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of locally visible entries.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    /// True if no entries are locally visible.
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("memory-store")
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> EcStore<V> for MemoryStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        self.inner.read().unwrap().get(key).cloned()
    }

    async fn put(&self, key: &str, value: V) {
        self.inner.write().unwrap().insert(key.to_string(), value);
        debug!("{}: put '{}'", self.label(), key);
    }

    async fn entries(&self) -> Vec<(String, V)> {
        self.inner
            .read()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    async fn remove(&self, key: &str) -> Option<V> {
        let removed = self.inner.write().unwrap().remove(key);
        if removed.is_some() {
            debug!("{}: removed '{}'", self.label(), key);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_read_your_own_write() {
        let store: MemoryStore<String> = MemoryStore::new();
        assert!(store.get("k").await.is_none());

        store.put("k", "v".to_string()).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_entries_snapshot() {
        let store: MemoryStore<u32> = MemoryStore::new();
        store.put("a", 1).await;
        store.put("b", 2).await;

        let mut entries = store.entries().await;
        entries.sort();
        assert_eq!(entries, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_remove() {
        let store: MemoryStore<u32> = MemoryStore::new();
        store.put("a", 1).await;

        assert_eq!(store.remove("a").await, Some(1));
        assert_eq!(store.remove("a").await, None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_name() {
        let named: MemoryStore<u32> = MemoryStore::named("netl3vpn-instance");
        assert_eq!(named.name(), Some("netl3vpn-instance"));

        let anonymous: MemoryStore<u32> = MemoryStore::new();
        assert_eq!(anonymous.name(), None);
    }
}
