//! Caching layer.
//!
//! This module provides:
//! - [`KeyValueStore`] - the minimal store capability the cache consumes
//! - [`RedisStore`] - Redis-backed store for production
//! - [`MemoryStore`] - in-process store for tests and Redis-less runs
//! - [`ReadThroughCache`] - read-through caching with miss coalescing and
//!   history logging

mod memory;
mod read_through;
mod redis;
mod store;

pub use memory::MemoryStore;
pub use read_through::{DEFAULT_EXPIRATION, ReadThroughCache};
pub use self::redis::RedisStore;
pub use store::KeyValueStore;
