use crate::core::cache::{KeyValueCache, expires_at};
use crate::core::clock::{Clock, SystemClock};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheValue {
    value: String,
    expires_at: SystemTime,
}

/// In-process cache, lost when the process exits
pub struct MemoryCache {
    inner: Mutex<HashMap<String, CacheValue>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut cache = self.inner.lock().await;
        match cache.get(key) {
            Some(entry) if entry.expires_at > self.clock.now() => {
                debug!("Cache HIT for key: {}", key);
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!("Cache entry expired for key: {}", key);
                cache.remove(key);
                None
            }
            None => {
                debug!("Cache MISS for key: {}", key);
                None
            }
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) {
        let cache_value = CacheValue {
            value: value.to_string(),
            expires_at: expires_at(self.clock.now(), ttl),
        };

        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {}", key);
        cache.insert(key.to_string(), cache_value);
    }

    async fn clear(&self) {
        let mut cache = self.inner.lock().await;
        cache.clear();
        debug!("Cache CLEAR");
    }
}
