//! In-process cache backend
//!
//! Backs `process --dry-run` and the test suite. Clones share the same map,
//! so every "connection" handed out by [`MemoryConnector`] sees the same data.

use super::{CacheStore, StoreConnector};
use crate::error::{MatcacheError, MatcacheResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `set` calls, including overwrites
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().map(|g| g.is_empty()).unwrap_or(true)
    }

    /// Sorted snapshot of the stored keys
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .read()
            .map(|g| g.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

fn poisoned() -> MatcacheError {
    MatcacheError::StoreUnavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> MatcacheResult<()> {
        let mut guard = self.inner.write().map_err(|_| poisoned())?;
        guard.insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, key: &str) -> MatcacheResult<Option<Vec<u8>>> {
        let guard = self.inner.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    async fn exists(&self, key: &str) -> MatcacheResult<bool> {
        let guard = self.inner.read().map_err(|_| poisoned())?;
        Ok(guard.contains_key(key))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Hands out clones of one shared [`MemoryStore`]
#[derive(Clone, Default)]
pub struct MemoryConnector {
    store: MemoryStore,
}

impl MemoryConnector {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[async_trait]
impl StoreConnector for MemoryConnector {
    async fn connect(&self) -> MatcacheResult<Box<dyn CacheStore>> {
        Ok(Box::new(self.store.clone()))
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
