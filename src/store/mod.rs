pub mod disk;
pub mod memory;

use crate::core::cache::KeyValueCache;
use crate::core::clock::Clock;
use crate::core::config::AppConfig;
use disk::DiskCache;
use memory::MemoryCache;
use std::sync::Arc;
use tracing::{debug, warn};

/// Opens the quote cache described by the config.
///
/// A persistent cache lives under `<data dir>/cache`. If it cannot be opened
/// the lookups still work, just without caching across runs.
pub fn open_cache(config: &AppConfig, clock: Arc<dyn Clock>) -> Arc<dyn KeyValueCache> {
    if !config.cache.persist {
        debug!("Using in-memory cache");
        return Arc::new(MemoryCache::with_clock(clock));
    }

    let disk = config
        .default_data_path()
        .and_then(|path| DiskCache::open_with_clock(&path.join("cache"), Arc::clone(&clock)));

    match disk {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            warn!("Failed to open disk cache: {}. Falling back to memory", e);
            Arc::new(MemoryCache::with_clock(clock))
        }
    }
}
