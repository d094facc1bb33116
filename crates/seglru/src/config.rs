//! Capacity and weight configuration for cache segments

use crate::error::{Error, Result};

/// Computes the weighted size of a value for capacity accounting
pub type Weigher<V> = Box<dyn Fn(&V) -> usize + Send + Sync>;

/// Capacity settings for a single segment
///
/// The common case is a count-based capacity: each entry weighs 1 and the
/// segment holds at most `capacity` entries. Attaching a weigher switches
/// the segment to size-based accounting, where each value's weight is
/// computed on insert and the cumulative weight is bounded instead.
///
/// A bare `usize` converts into a count-based config:
///
/// ```
/// use seglru::SegmentConfig;
///
/// let config: SegmentConfig<String> = 100.into();
/// assert_eq!(config.capacity(), 100);
/// ```
pub struct SegmentConfig<V> {
    capacity: usize,
    weigher: Option<Weigher<V>>,
}

impl<V> SegmentConfig<V> {
    /// Create a count-based config: unit weight per entry
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            weigher: None,
        }
    }

    /// Create a size-based config with a per-value weight function
    pub fn weighted(
        capacity: usize,
        weigher: impl Fn(&V) -> usize + Send + Sync + 'static,
    ) -> Self {
        Self {
            capacity,
            weigher: Some(Box::new(weigher)),
        }
    }

    /// Get the configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Validate and decompose, rejecting zero capacity
    pub(crate) fn into_parts(self) -> Result<(usize, Option<Weigher<V>>)> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok((self.capacity, self.weigher))
    }
}

impl<V> From<usize> for SegmentConfig<V> {
    fn from(capacity: usize) -> Self {
        Self::new(capacity)
    }
}

/// Configuration for a full segmented cache
///
/// The protected and probationary segments are configured independently;
/// either may be count-based or weighted.
pub struct CacheConfig<V> {
    /// Settings for the protected segment
    pub protected: SegmentConfig<V>,
    /// Settings for the probationary segment
    pub probationary: SegmentConfig<V>,
}

impl<V> CacheConfig<V> {
    /// Build a config from two segment settings (bare counts accepted)
    pub fn new(
        protected: impl Into<SegmentConfig<V>>,
        probationary: impl Into<SegmentConfig<V>>,
    ) -> Self {
        Self {
            protected: protected.into(),
            probationary: probationary.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_config() {
        let config: SegmentConfig<i32> = SegmentConfig::new(10);
        let (capacity, weigher) = config.into_parts().unwrap();
        assert_eq!(capacity, 10);
        assert!(weigher.is_none());
    }

    #[test]
    fn test_weighted_config() {
        let config = SegmentConfig::weighted(64, |v: &Vec<u8>| v.len());
        let (capacity, weigher) = config.into_parts().unwrap();
        assert_eq!(capacity, 64);
        let weigher = weigher.unwrap();
        assert_eq!(weigher(&vec![0u8; 16]), 16);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config: SegmentConfig<i32> = SegmentConfig::new(0);
        assert!(config.into_parts().is_err());
    }

    #[test]
    fn test_cache_config_from_counts() {
        let config: CacheConfig<i32> = CacheConfig::new(4, 16);
        assert_eq!(config.protected.capacity(), 4);
        assert_eq!(config.probationary.capacity(), 16);
    }
}
