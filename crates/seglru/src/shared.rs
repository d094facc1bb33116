//! Thread-safe handle around a segmented cache
//!
//! The core [`SegmentedCache`] has single-threaded semantics: the two
//! segments and their cross-wiring mutate as a unit, so concurrent callers
//! must serialize every call behind one exclusive lock. This wrapper is
//! that lock.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::SegmentedCache;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::stats::CacheStats;

/// Clonable, thread-safe handle to a [`SegmentedCache`]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<SegmentedCache<K, V>>>,
    stats: Arc<CacheStats>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Create a shared cache with count-based capacities
    pub fn new(protected_capacity: usize, probationary_capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::new(protected_capacity, probationary_capacity))
    }

    /// Create a shared cache from per-segment settings
    pub fn with_config(config: CacheConfig<V>) -> Result<Self> {
        let cache = SegmentedCache::with_config(config)?;
        let stats = cache.stats_handle();
        Ok(Self {
            inner: Arc::new(Mutex::new(cache)),
            stats,
        })
    }

    /// Get a value, promoting the key on a hit
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// Get a value without promotion
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key)
    }

    /// Insert or update a key-value pair
    pub fn set(&self, key: K, value: V) {
        self.inner.lock().set(key, value);
    }

    /// Check for a key in either segment
    pub fn has(&self, key: &K) -> bool {
        self.inner.lock().has(key)
    }

    /// Remove a key from the whole cache
    pub fn delete(&self, key: &K) -> Option<V> {
        self.inner.lock().delete(key)
    }

    /// Remove every entry
    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Get the total entry count
    pub fn count(&self) -> usize {
        self.inner.lock().count()
    }

    /// Get the total weighted size
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
