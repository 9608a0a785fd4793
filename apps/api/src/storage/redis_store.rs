use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use crate::storage::{KeyValueStore, StoreError};

const KEY_PREFIX: &str = "intern-check:";

/// Upper bound on a single command round trip; a stalled server surfaces as
/// a `StoreError` instead of hanging the request.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Redis-backed store. Keys are namespaced so `clear` only touches ours.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client
            .get_multiplexed_async_connection_with_timeouts(RESPONSE_TIMEOUT, CONNECTION_TIMEOUT)
            .await?;
        info!("Redis connection established");
        Ok(Self { connection })
    }
}

fn namespaced(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn save(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(namespaced(key), value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(namespaced(key)).await?;
        Ok(value)
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let removed: i64 = conn.del(namespaced(key)).await?;
        Ok(removed > 0)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.keys(format!("{KEY_PREFIX}*")).await?;
        if !keys.is_empty() {
            conn.del::<_, ()>(keys).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connection.clone();
        let raw: Vec<String> = conn.keys(format!("{KEY_PREFIX}*")).await?;
        let mut keys: Vec<String> = raw
            .into_iter()
            .filter_map(|k| k.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        assert_eq!(namespaced("hf_api_key"), "intern-check:hf_api_key");
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        assert!(matches!(
            RedisStore::connect("not-a-redis-url").await,
            Err(StoreError::Redis(_))
        ));
    }
}
