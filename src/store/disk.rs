use crate::core::cache::{KeyValueCache, expires_at};
use crate::core::clock::Clock;
use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::debug;

const PARTITION: &str = "quotes";

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    value: String,
    expires_at: SystemTime,
}

/// Cache kept on disk so quotes survive between CLI invocations
pub struct DiskCache {
    keyspace: Keyspace,
    partition: PartitionHandle,
    clock: Arc<dyn Clock>,
}

impl DiskCache {
    pub fn open_with_clock(path: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let keyspace = fjall::Config::new(path).open()?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        Ok(Self {
            keyspace,
            partition,
            clock,
        })
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let Some(bytes) = self.partition.get(key)? else {
            debug!("Cache MISS for key: {}", key);
            return Ok(None);
        };

        let entry: CacheEntry = serde_json::from_slice(&bytes)?;
        if entry.expires_at <= self.clock.now() {
            debug!("Cache entry expired for key: {}", key);
            self.partition.remove(key)?;
            return Ok(None);
        }
        debug!("Cache HIT for key: {}", key);
        Ok(Some(entry.value))
    }

    fn write(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: expires_at(self.clock.now(), ttl),
        };
        self.partition.insert(key, serde_json::to_vec(&entry)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Cache PUT for key: {}", key);
        Ok(())
    }

    fn remove_all(&self) -> Result<()> {
        let keys = self.partition.keys().collect::<Result<Vec<_>, _>>()?;
        for key in keys {
            self.partition.remove(key)?;
        }
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueCache for DiskCache {
    async fn get(&self, key: &str) -> Option<String> {
        match self.read(key) {
            Ok(value) => value,
            Err(e) => {
                debug!("DiskCache get error: {}", e);
                None
            }
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) {
        if let Err(e) = self.write(key, value, ttl) {
            debug!("DiskCache put error: {}", e);
        }
    }

    async fn clear(&self) {
        if let Err(e) = self.remove_all() {
            debug!("DiskCache clear error: {}", e);
        } else {
            debug!("Cache CLEAR");
        }
    }
}
