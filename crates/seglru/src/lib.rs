//! # seglru
//!
//! In-memory key-value cache implementing the Segmented LRU (SLRU)
//! admission/eviction policy.
//!
//! ## Architecture
//! - **OrderedStore**: recency-ordered map, O(1) ops via AHash index +
//!   arena-backed doubly-linked list, with a removal hook
//! - **SegmentedCache**: probationary + protected segments wired through
//!   the protected store's removal hook (overflow demotes, never destroys)
//! - **Scan resistance**: keys accessed once can only ever displace other
//!   one-shot keys, so the working set survives sequential scans
//!
//! ## Example
//!
//! ```
//! use seglru::SegmentedCache;
//!
//! let mut cache = SegmentedCache::new(2, 2).unwrap();
//!
//! cache.set(1, "one"); // New keys start probationary
//! cache.get(&1); // Repeat access promotes to protected
//!
//! // A one-shot scan cannot displace the promoted key
//! cache.set(2, "two");
//! cache.set(3, "three");
//! cache.set(4, "four");
//! assert_eq!(cache.peek(&1), Some("one"));
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod shared;
mod stats;
mod store;

pub use cache::SegmentedCache;
pub use config::{CacheConfig, SegmentConfig, Weigher};
pub use error::{Error, Result};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{OrderedStore, RemovalHook};
