use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::collections::HashMap;

use crate::config::Config;

/// Store operations consumed by the request handlers.
///
/// Mirrors the small slice of the Redis command set this service uses:
/// GET/SET/DEL on string keys and HGET/HGETALL/HSET/HDEL on hashes.
/// The delete operations return the affected count so handlers can map
/// zero-affected results to 404.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_string(&self, key: &str) -> Result<Option<String>>;
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;
    async fn delete_string(&self, key: &str) -> Result<u64>;
    async fn get_hash_field(&self, key: &str, field: &str) -> Result<Option<String>>;
    async fn get_hash_all(&self, key: &str) -> Result<HashMap<String, String>>;
    async fn set_hash_field(&self, key: &str, field: &str, value: &str) -> Result<()>;
    async fn set_hash_fields(&self, key: &str, fields: &HashMap<String, String>) -> Result<()>;
    async fn delete_hash_field(&self, key: &str, field: &str) -> Result<u64>;
    async fn ping(&self) -> Result<()>;
}

/// Shareable Redis-backed store for use across async handlers
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis using the provided config.
    ///
    /// The connection is established once at startup and the resulting
    /// manager is cloned into every handler; the manager multiplexes
    /// requests over a single connection and reconnects on failure.
    /// A PING is issued before returning so a misconfigured store fails
    /// the process at boot rather than on the first request.
    pub async fn connect(config: &Config) -> Result<Self> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.redis_host.clone(), config.redis_port),
            redis: RedisConnectionInfo {
                db: config.redis_db,
                username: config.redis_username.clone(),
                password: config.redis_password.clone(),
                ..Default::default()
            },
        };

        let client = redis::Client::open(info)
            .context("Failed to create Redis client")?;

        let conn = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        let store = Self { conn };
        store.ping().await.context("Redis did not respond to PING")?;

        tracing::info!(
            "Connected to Redis at {}:{} (db {})",
            config.redis_host,
            config.redis_port,
            config.redis_db
        );

        Ok(store)
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .context("Redis GET failed")?;
        Ok(value)
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .context("Redis SET failed")?;
        Ok(())
    }

    async fn delete_string(&self, key: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let deleted: u64 = conn
            .del(key)
            .await
            .context("Redis DEL failed")?;
        Ok(deleted)
    }

    async fn get_hash_field(&self, key: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .hget(key, field)
            .await
            .context("Redis HGET failed")?;
        Ok(value)
    }

    async fn get_hash_all(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.conn.clone();
        let hash: HashMap<String, String> = conn
            .hgetall(key)
            .await
            .context("Redis HGETALL failed")?;
        Ok(hash)
    }

    async fn set_hash_field(&self, key: &str, field: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(key, field, value)
            .await
            .context("Redis HSET failed")?;
        Ok(())
    }

    async fn set_hash_fields(&self, key: &str, fields: &HashMap<String, String>) -> Result<()> {
        // Single bulk HSET rather than one call per field
        let pairs: Vec<(&str, &str)> = fields
            .iter()
            .map(|(f, v)| (f.as_str(), v.as_str()))
            .collect();

        let mut conn = self.conn.clone();
        conn.hset_multiple::<_, _, _, ()>(key, &pairs)
            .await
            .context("Redis HSET (bulk) failed")?;
        Ok(())
    }

    async fn delete_hash_field(&self, key: &str, field: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let deleted: u64 = conn
            .hdel(key, field)
            .await
            .context("Redis HDEL failed")?;
        Ok(deleted)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis PING failed")?;
        if reply == "PONG" {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Unexpected PING reply: {}", reply))
        }
    }
}

/// In-memory store used by handler tests.
///
/// Mirrors the Redis semantics the handlers depend on: string and hash
/// entries share one keyspace, a hash whose last field is deleted
/// disappears entirely, and type-mismatched commands fail the way a
/// WRONGTYPE reply would.
#[cfg(test)]
pub mod memory {
    use super::*;
    use std::sync::Mutex;

    enum Entry {
        Text(String),
        Hash(HashMap<String, String>),
    }

    #[derive(Default)]
    pub struct MemoryStore {
        entries: Mutex<HashMap<String, Entry>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl Store for MemoryStore {
        async fn get_string(&self, key: &str) -> Result<Option<String>> {
            let entries = self.entries.lock().unwrap();
            match entries.get(key) {
                Some(Entry::Text(v)) => Ok(Some(v.clone())),
                Some(Entry::Hash(_)) => Err(anyhow::anyhow!(
                    "WRONGTYPE Operation against a key holding the wrong kind of value"
                )),
                None => Ok(None),
            }
        }

        async fn set_string(&self, key: &str, value: &str) -> Result<()> {
            let mut entries = self.entries.lock().unwrap();
            entries.insert(key.to_string(), Entry::Text(value.to_string()));
            Ok(())
        }

        async fn delete_string(&self, key: &str) -> Result<u64> {
            let mut entries = self.entries.lock().unwrap();
            Ok(u64::from(entries.remove(key).is_some()))
        }

        async fn get_hash_field(&self, key: &str, field: &str) -> Result<Option<String>> {
            let entries = self.entries.lock().unwrap();
            match entries.get(key) {
                Some(Entry::Hash(h)) => Ok(h.get(field).cloned()),
                Some(Entry::Text(_)) => Err(anyhow::anyhow!(
                    "WRONGTYPE Operation against a key holding the wrong kind of value"
                )),
                None => Ok(None),
            }
        }

        async fn get_hash_all(&self, key: &str) -> Result<HashMap<String, String>> {
            let entries = self.entries.lock().unwrap();
            match entries.get(key) {
                Some(Entry::Hash(h)) => Ok(h.clone()),
                Some(Entry::Text(_)) => Err(anyhow::anyhow!(
                    "WRONGTYPE Operation against a key holding the wrong kind of value"
                )),
                None => Ok(HashMap::new()),
            }
        }

        async fn set_hash_field(&self, key: &str, field: &str, value: &str) -> Result<()> {
            let mut entries = self.entries.lock().unwrap();
            match entries
                .entry(key.to_string())
                .or_insert_with(|| Entry::Hash(HashMap::new()))
            {
                Entry::Hash(h) => {
                    h.insert(field.to_string(), value.to_string());
                    Ok(())
                }
                Entry::Text(_) => Err(anyhow::anyhow!(
                    "WRONGTYPE Operation against a key holding the wrong kind of value"
                )),
            }
        }

        async fn set_hash_fields(&self, key: &str, fields: &HashMap<String, String>) -> Result<()> {
            let mut entries = self.entries.lock().unwrap();
            match entries
                .entry(key.to_string())
                .or_insert_with(|| Entry::Hash(HashMap::new()))
            {
                Entry::Hash(h) => {
                    for (f, v) in fields {
                        h.insert(f.clone(), v.clone());
                    }
                    Ok(())
                }
                Entry::Text(_) => Err(anyhow::anyhow!(
                    "WRONGTYPE Operation against a key holding the wrong kind of value"
                )),
            }
        }

        async fn delete_hash_field(&self, key: &str, field: &str) -> Result<u64> {
            let mut entries = self.entries.lock().unwrap();
            let Some(Entry::Hash(h)) = entries.get_mut(key) else {
                return Ok(0);
            };
            let deleted = u64::from(h.remove(field).is_some());
            if h.is_empty() {
                entries.remove(key);
            }
            Ok(deleted)
        }

        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    /// Store whose every operation fails, for exercising the 500 path.
    pub struct FailingStore;

    #[async_trait]
    impl Store for FailingStore {
        async fn get_string(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn set_string(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn delete_string(&self, _key: &str) -> Result<u64> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn get_hash_field(&self, _key: &str, _field: &str) -> Result<Option<String>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn get_hash_all(&self, _key: &str) -> Result<HashMap<String, String>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn set_hash_field(&self, _key: &str, _field: &str, _value: &str) -> Result<()> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn set_hash_fields(
            &self,
            _key: &str,
            _fields: &HashMap<String, String>,
        ) -> Result<()> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn delete_hash_field(&self, _key: &str, _field: &str) -> Result<u64> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn ping(&self) -> Result<()> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_memory_store_string_round_trip() {
            let store = MemoryStore::new();
            store.set_string("greeting", "hello").await.unwrap();
            assert_eq!(
                store.get_string("greeting").await.unwrap(),
                Some("hello".to_string())
            );
            assert_eq!(store.delete_string("greeting").await.unwrap(), 1);
            assert_eq!(store.get_string("greeting").await.unwrap(), None);
            assert_eq!(store.delete_string("greeting").await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_memory_store_hash_empties_out() {
            let store = MemoryStore::new();
            store.set_hash_field("h", "a", "1").await.unwrap();
            store.set_hash_field("h", "b", "2").await.unwrap();

            assert_eq!(store.delete_hash_field("h", "a").await.unwrap(), 1);
            assert_eq!(store.delete_hash_field("h", "a").await.unwrap(), 0);
            assert_eq!(store.delete_hash_field("h", "b").await.unwrap(), 1);

            // Deleting the last field removes the key, like Redis does
            assert!(store.get_hash_all("h").await.unwrap().is_empty());
            assert_eq!(store.delete_string("h").await.unwrap(), 0);
        }

        #[tokio::test]
        async fn test_memory_store_wrong_type() {
            let store = MemoryStore::new();
            store.set_string("s", "text").await.unwrap();
            assert!(store.get_hash_all("s").await.is_err());
            assert!(store.set_hash_field("s", "f", "v").await.is_err());
        }
    }
}
