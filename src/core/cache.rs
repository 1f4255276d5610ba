//! Expiring key-value cache abstraction

use async_trait::async_trait;
use std::time::{Duration, SystemTime};

/// How long a looked-up quote stays fresh.
pub const QUOTE_TTL: Duration = Duration::from_secs(5 * 60);

/// Longest TTL honoured. Anything above is treated as this.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A string store whose entries expire after a per-entry TTL.
///
/// Backend failures are not surfaced: a cache that cannot be read behaves
/// like an empty one.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn put(&self, key: &str, value: &str, ttl: Duration);

    async fn clear(&self);
}

/// Expiry instant of an entry written at `now`, with `ttl` capped at [`MAX_TTL`].
pub fn expires_at(now: SystemTime, ttl: Duration) -> SystemTime {
    now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now)
}
