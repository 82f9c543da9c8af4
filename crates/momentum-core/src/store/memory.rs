//! In-process key-value store.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::error::{MomentumError, Result};

#[derive(Debug, Default)]
struct Slots {
    values: BTreeMap<String, String>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
}

/// Volatile store for embedders and tests.
///
/// Clones share the same slots. Individual keys can be made to fail so the
/// storage-error paths can be driven deterministically.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<Slots>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent read of `key` fail.
    pub async fn fail_reads(&self, key: &str) {
        self.slots.lock().await.failing_reads.insert(key.to_string());
    }

    /// Makes every subsequent set/remove of `key` fail.
    pub async fn fail_writes(&self, key: &str) {
        self.slots.lock().await.failing_writes.insert(key.to_string());
    }

    /// Clears all injected failures.
    pub async fn heal(&self) {
        let mut slots = self.slots.lock().await;
        slots.failing_reads.clear();
        slots.failing_writes.clear();
    }

    /// Whether a value is stored under `key`. Ignores injected failures.
    pub async fn contains(&self, key: &str) -> bool {
        self.slots.lock().await.values.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().await;
        if slots.failing_reads.contains(key) {
            return Err(MomentumError::storage(key, "injected read failure"));
        }
        Ok(slots.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().await;
        if slots.failing_writes.contains(key) {
            return Err(MomentumError::storage(key, "injected write failure"));
        }
        slots.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.lock().await;
        if slots.failing_writes.contains(key) {
            return Err(MomentumError::storage(key, "injected write failure"));
        }
        slots.values.remove(key);
        Ok(())
    }
}
