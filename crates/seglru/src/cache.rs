//! SegmentedCache: two recency-ordered stores wired into the SLRU protocol

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::stats::CacheStats;
use crate::store::OrderedStore;

/// Segmented LRU cache
///
/// Splits capacity into a *probationary* segment (keys seen once) and a
/// *protected* segment (keys seen more than once). New keys start
/// probationary; a repeat access promotes them. When the protected segment
/// overflows, its least-recently-used entry is demoted back to probationary
/// rather than destroyed, so permanent eviction only ever happens from the
/// probationary side. One-shot keys therefore cannot displace the working
/// set: that is the scan resistance SLRU exists for.
///
/// The protected store's removal hook is bound at construction to reinsert
/// demoted entries at the probationary most-recently-used position. The
/// probationary store is shared with that hook through a narrow sink handle,
/// so the two stores never own each other.
///
/// Single-threaded semantics: every operation runs to completion
/// synchronously, cascades included. For cross-thread use wrap the cache in
/// one exclusive lock (see [`SharedCache`](crate::SharedCache)).
pub struct SegmentedCache<K, V> {
    protected: OrderedStore<K, V>,
    probationary: Arc<Mutex<OrderedStore<K, V>>>,
    stats: Arc<CacheStats>,
}

impl<K, V> SegmentedCache<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Create a cache with count-based capacities for both segments
    pub fn new(protected_capacity: usize, probationary_capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::new(protected_capacity, probationary_capacity))
    }

    /// Create a cache from per-segment capacity/weight settings
    pub fn with_config(config: CacheConfig<V>) -> Result<Self> {
        let stats = Arc::new(CacheStats::new());
        let probationary = Arc::new(Mutex::new(OrderedStore::new(config.probationary)?));

        // Entries leaving the protected segment are demoted, not destroyed:
        // the hook reinserts them at the probationary MRU position, which
        // may itself cascade-evict from probationary.
        let sink = Arc::clone(&probationary);
        let demotions = Arc::clone(&stats);
        let protected = OrderedStore::with_removal_hook(config.protected, move |key, value| {
            demotions.record_demotion();
            sink.lock().set(key, value);
        })?;

        Ok(Self {
            protected,
            probationary,
            stats,
        })
    }

    /// Get a value, promoting the key on a hit
    ///
    /// A protected hit refreshes recency in place. A probationary hit moves
    /// the entry into the protected segment, which may demote another entry
    /// and cascade an eviction before this call returns.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if let Some(value) = self.protected.get(key) {
            self.stats.record_hit();
            return Some(value.clone());
        }

        // Probationary segment has no hook, so this delete is silent
        let promoted = self.probationary.lock().delete(key);
        match promoted {
            Some(value) => {
                self.stats.record_hit();
                self.stats.record_promotion();
                self.protected.set(key.clone(), value.clone());
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Get a value without promotion or recency mutation
    pub fn peek(&self, key: &K) -> Option<V> {
        if let Some(value) = self.protected.peek(key) {
            return Some(value.clone());
        }
        self.probationary.lock().peek(key).cloned()
    }

    /// Insert or update a key-value pair
    ///
    /// A brand-new key always starts probationary. Updating a probationary
    /// key promotes it; updating a protected key replaces the value in
    /// place without any segment movement.
    pub fn set(&mut self, key: K, value: V) {
        self.stats.record_insert();

        if self.protected.has(&key) {
            self.protected.set(key, value);
            return;
        }

        let promoted = self.probationary.lock().delete(&key).is_some();
        if promoted {
            self.stats.record_promotion();
            self.protected.set(key, value);
        } else {
            self.probationary.lock().set(key, value);
        }
    }

    /// Check for a key in either segment, no recency mutation
    pub fn has(&self, key: &K) -> bool {
        self.protected.has(key) || self.probationary.lock().has(key)
    }

    /// Remove a key from the whole cache
    ///
    /// Returns the removed value if the key was present in either segment.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let evicted = self.probationary.lock().delete(key);
        match self.protected.delete(key) {
            // Deleting from protected fired the demotion hook, which put
            // the entry straight back into probationary; purge it again.
            Some(value) => {
                self.probationary.lock().delete(key);
                Some(value)
            }
            None => evicted,
        }
    }

    /// Remove every entry from both segments
    pub fn reset(&mut self) {
        // Protected first: its hook demotes every entry into probationary,
        // and the probationary reset then purges those as well. The reverse
        // order would leave the demoted entries behind.
        self.protected.reset();
        self.probationary.lock().reset();
        self.stats.reset();
    }

    /// Visit all entries: protected segment first, most-recently-used first
    /// within each segment
    pub fn for_each(&self, mut visit: impl FnMut(&K, &V)) {
        self.protected.for_each(&mut visit);
        self.probationary.lock().for_each(&mut visit);
    }

    /// Visit all entries: protected segment first, least-recently-used
    /// first within each segment
    ///
    /// Only the within-segment order reverses relative to [`for_each`];
    /// the segment order does not.
    ///
    /// [`for_each`]: SegmentedCache::for_each
    pub fn for_each_rev(&self, mut visit: impl FnMut(&K, &V)) {
        self.protected.for_each_rev(&mut visit);
        self.probationary.lock().for_each_rev(&mut visit);
    }

    /// Collect all keys in [`for_each`](SegmentedCache::for_each) order
    pub fn keys(&self) -> Vec<K> {
        let mut keys = self.protected.keys();
        keys.extend(self.probationary.lock().keys());
        keys
    }

    /// Collect all values in [`for_each`](SegmentedCache::for_each) order
    pub fn values(&self) -> Vec<V> {
        let mut values = self.protected.values();
        values.extend(self.probationary.lock().values());
        values
    }

    /// Get the total entry count across both segments
    pub fn count(&self) -> usize {
        self.protected.count() + self.probationary.lock().count()
    }

    /// Get the total weighted size across both segments
    pub fn size(&self) -> usize {
        self.protected.size() + self.probationary.lock().size()
    }

    /// Check if both segments are empty
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub(crate) fn stats_handle(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }
}
