//! Persistent TTL cache for forecast payloads backed by fjall

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // unix seconds
}

/// Handle to the on-disk cache. Cloning shares the underlying keyspace.
#[derive(Clone)]
pub struct PersistentCache {
    store: Keyspace,
    ttl: Duration,
}

fn read_bytes(store: &Keyspace, key: &[u8]) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

fn now_secs() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

impl PersistentCache {
    /// Open (or create) the cache directory with the given entry lifetime.
    pub fn open(path: impl AsRef<Path>, ttl: Duration) -> Result<Self> {
        let db = fjall::Database::builder(path.as_ref()).open()?;
        let store = db.keyspace("forecasts", fjall::KeyspaceCreateOptions::default)?;
        Ok(Self { store, ttl })
    }

    /// Store a value under `key` using the cache's default TTL.
    pub async fn put<T: Serialize + Send + Debug + 'static>(&self, key: &str, value: T) -> Result<()> {
        self.put_with_ttl(key, value, self.ttl).await
    }

    #[tracing::instrument(name = "cache_put", level = "debug", skip(self, value))]
    pub async fn put_with_ttl<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or_else(|| anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let bytes = postcard::to_stdvec(&StoredEntry { value, expires_at })?;

        task::spawn_blocking(move || store.insert(key, bytes)).await??;
        Ok(())
    }

    /// Fetch a fresh value. Expired or undecodable entries are dropped and read as a miss.
    #[tracing::instrument(name = "cache_get", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let Some(bytes) = task::spawn_blocking(move || read_bytes(&store, &key_bytes)).await?? else {
            tracing::debug!("Cache miss");
            return Ok(None);
        };

        match postcard::from_bytes::<StoredEntry<T>>(&bytes) {
            Ok(entry) if now_secs()? < entry.expires_at => {
                tracing::debug!("Cache hit");
                Ok(Some(entry.value))
            }
            Ok(_) => {
                tracing::debug!("Cache entry expired");
                self.remove(key).await?;
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable cache entry: {e}");
                self.remove(key).await?;
                Ok(None)
            }
        }
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key)).await??;
        Ok(())
    }
}
