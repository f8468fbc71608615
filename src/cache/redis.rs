//! Redis-backed key-value store.

use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::cache::store::KeyValueStore;
use crate::error::ServiceError;

/// Store backed by a shared Redis connection.
///
/// `ConnectionManager` multiplexes and reconnects internally, so the store
/// is cheap to clone per task.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// Connect to the Redis instance at `url`.
    pub async fn connect(url: &str) -> Result<Self, ServiceError> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }
}

impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let mut connection = self.connection.clone();
        Ok(connection.get(key).await?)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), ServiceError> {
        let mut connection = self.connection.clone();
        // SETEX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        let _: () = connection.set_ex(key, value, seconds).await?;
        Ok(())
    }

    async fn prepend_to_list(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        let mut connection = self.connection.clone();
        let _: () = connection.lpush(key, value).await?;
        Ok(())
    }

    async fn read_list(&self, key: &str) -> Result<Vec<String>, ServiceError> {
        let mut connection = self.connection.clone();
        Ok(connection.lrange(key, 0, -1).await?)
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}
