//! In-process key-value store with passive expiry.
//!
//! Backs the cache in tests and Redis-less development runs. Entries are
//! checked against their deadline on read, the way a cache service expires
//! them server-side.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::cache::store::KeyValueStore;
use crate::error::ServiceError;

/// An in-memory [`KeyValueStore`].
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    values: HashMap<String, (String, Instant)>,
    lists: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock poisoned")
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let mut inner = self.lock();
        let expired = match inner.values.get(key) {
            Some((value, deadline)) => {
                if Instant::now() < *deadline {
                    return Ok(Some(value.clone()));
                }
                true
            }
            None => false,
        };
        if expired {
            inner.values.remove(key);
        }
        Ok(None)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), ServiceError> {
        self.lock()
            .values
            .insert(key.to_owned(), (value.to_owned(), Instant::now() + ttl));
        Ok(())
    }

    async fn prepend_to_list(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        self.lock()
            .lists
            .entry(key.to_owned())
            .or_default()
            .insert(0, value.to_owned());
        Ok(())
    }

    async fn read_list(&self, key: &str) -> Result<Vec<String>, ServiceError> {
        Ok(self.lock().lists.get(key).cloned().unwrap_or_default())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}
