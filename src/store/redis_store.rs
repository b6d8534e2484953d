//! Redis backend

use super::{CacheStore, StoreConnector};
use crate::config::schema::CacheConfig;
use crate::error::{MatcacheError, MatcacheResult};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::debug;

/// Opens Redis connections for a configured host/port/db
///
/// Building the connector only validates the address; no connection is
/// made until a worker calls [`StoreConnector::connect`].
pub struct RedisConnector {
    client: redis::Client,
    address: String,
}

impl RedisConnector {
    pub fn new(config: &CacheConfig) -> MatcacheResult<Self> {
        let address = config.url();
        let client =
            redis::Client::open(address.as_str()).map_err(|e| MatcacheError::StoreAddress {
                address: address.clone(),
                source: e,
            })?;

        Ok(Self { client, address })
    }
}

#[async_trait]
impl StoreConnector for RedisConnector {
    async fn connect(&self) -> MatcacheResult<Box<dyn CacheStore>> {
        debug!("Connecting to {}", self.address);
        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| MatcacheError::StoreConnect {
                address: self.address.clone(),
                source: e,
            })?;

        Ok(Box::new(RedisStore { conn }))
    }

    fn describe(&self) -> String {
        self.address.clone()
    }
}

/// A single Redis connection
pub struct RedisStore {
    conn: MultiplexedConnection,
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn set(&self, key: &str, value: &[u8]) -> MatcacheResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| MatcacheError::store_command("SET", key, e))
    }

    async fn get(&self, key: &str) -> MatcacheResult<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| MatcacheError::store_command("GET", key, e))
    }

    async fn exists(&self, key: &str) -> MatcacheResult<bool> {
        let mut conn = self.conn.clone();
        conn.exists::<_, bool>(key)
            .await
            .map_err(|e| MatcacheError::store_command("EXISTS", key, e))
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
