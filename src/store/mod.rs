//! Key-value cache store abstraction
//!
//! Provides a trait for the few cache operations matcache needs, so the
//! file processor can run against Redis in production and an in-memory
//! map in tests.
//!
//! Connections are not shared between worker tasks: every task asks the
//! [`StoreConnector`] for its own [`CacheStore`].

pub mod memory;
pub mod redis_store;
pub mod writer;

pub use memory::{MemoryConnector, MemoryStore};
pub use redis_store::{RedisConnector, RedisStore};
pub use writer::{read_matrix, write_matrix, CacheKeys};

use crate::error::MatcacheResult;
use async_trait::async_trait;

/// Abstract cache store interface
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &[u8]) -> MatcacheResult<()>;

    /// Fetch the value under `key`
    async fn get(&self, key: &str) -> MatcacheResult<Option<Vec<u8>>>;

    /// Check whether `key` exists
    async fn exists(&self, key: &str) -> MatcacheResult<bool>;

    /// Get the human-readable backend name for display
    fn backend_name(&self) -> &'static str;
}

/// Opens cache connections, one per worker task
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Open a new connection
    async fn connect(&self) -> MatcacheResult<Box<dyn CacheStore>>;

    /// Where connections go, for logs
    fn describe(&self) -> String;
}
