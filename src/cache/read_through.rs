//! Read-through caching with miss coalescing and history logging.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::cache::store::KeyValueStore;
use crate::error::ServiceError;

/// Fallback expiry applied when a caller does not pass a TTL.
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(60 * 60 * 8);

/// A cache that fills itself from a producer on miss.
///
/// Values cross the store boundary as JSON strings. Concurrent misses for
/// the same key coalesce behind a per-key lock: one caller produces, the
/// rest re-read the freshly stored value.
pub struct ReadThroughCache<S> {
    store: S,
    default_ttl: Duration,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: KeyValueStore> ReadThroughCache<S> {
    /// Create a cache with the 8-hour default TTL.
    pub fn new(store: S) -> Self {
        Self::with_default_ttl(store, DEFAULT_EXPIRATION)
    }

    /// Create a cache with a custom fallback TTL.
    pub fn with_default_ttl(store: S, default_ttl: Duration) -> Self {
        Self {
            store,
            default_ttl,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Serve `key` from the store, producing and recording the value on miss.
    ///
    /// On a miss the produced value is stored under `key` with `ttl` (the
    /// default when `None`) and, when `history_key` is given and the value
    /// does not serialize to JSON `null`, prepended to that history list.
    /// The producer is never invoked on a hit. Store and producer errors
    /// abort the whole call.
    pub async fn get_or_set<T, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        history_key: Option<&str>,
        producer: F,
    ) -> Result<T, ServiceError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        if let Some(cached) = self.store.get(key).await? {
            tracing::debug!(key, "cache hit");
            return Ok(serde_json::from_str(&cached)?);
        }

        let key_lock = {
            let mut in_flight = self.in_flight.lock().await;
            Arc::clone(in_flight.entry(key.to_owned()).or_default())
        };
        let guard = key_lock.lock().await;

        let result = async {
            // A coalesced caller may have filled the key while we waited.
            if let Some(cached) = self.store.get(key).await? {
                tracing::debug!(key, "cache hit after coalescing");
                return Ok(serde_json::from_str(&cached)?);
            }
            self.fill(key, ttl, history_key, producer).await
        }
        .await;

        drop(guard);
        self.release(key, key_lock).await;
        result
    }

    async fn fill<T, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        history_key: Option<&str>,
        producer: F,
    ) -> Result<T, ServiceError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        tracing::debug!(key, "cache miss");
        let produced = producer().await?;
        let serialized = serde_json::to_string(&produced)?;
        self.store
            .set_with_expiry(key, &serialized, ttl.unwrap_or(self.default_ttl))
            .await?;
        if let Some(history_key) = history_key {
            if serialized != "null" {
                self.store.prepend_to_list(history_key, &serialized).await?;
            }
        }
        Ok(produced)
    }

    /// Drop the in-flight entry once the last waiter is gone.
    async fn release(&self, key: &str, key_lock: Arc<Mutex<()>>) {
        drop(key_lock);
        let mut in_flight = self.in_flight.lock().await;
        if let Some(entry) = in_flight.get(key) {
            if Arc::strong_count(entry) == 1 {
                in_flight.remove(key);
            }
        }
    }

    /// Prepend `value` to the history list at `key`.
    pub async fn set_history<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ServiceError> {
        let serialized = serde_json::to_string(value)?;
        self.store.prepend_to_list(key, &serialized).await
    }

    /// The full history at `key`, newest first; empty when absent.
    pub async fn get_history<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, ServiceError> {
        self.store
            .read_list(key)
            .await?
            .iter()
            .map(|entry| serde_json::from_str(entry).map_err(ServiceError::from))
            .collect()
    }
}
