//! Minimal key-value capability consumed by the cache layer.

use std::future::Future;
use std::time::Duration;

use crate::error::ServiceError;

/// The store operations the cache layer needs.
///
/// Values are opaque serialized strings at this boundary. Methods return
/// `impl Future + Send` so generic consumers can be driven from
/// multi-threaded executors without naming the store's future types.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value at `key`; `None` when absent or expired.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, ServiceError>> + Send;

    /// Store `value` at `key`, expiring after `ttl`.
    ///
    /// Overwrites any previous value and resets the expiry.
    fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Prepend `value` to the list at `key`, creating the list when absent.
    fn prepend_to_list(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Read the whole list at `key`, newest entry first; empty when absent.
    fn read_list(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Vec<String>, ServiceError>> + Send;
}
