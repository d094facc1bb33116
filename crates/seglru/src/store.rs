//! Recency-ordered key-value store with bounded capacity
//!
//! Uses an index-based doubly-linked list over an arena of nodes for O(1)
//! access, insertion, and eviction. The arena sidesteps pointer aliasing:
//! the hashmap stores stable slot indices, and freed slots are recycled
//! through a free list.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::config::{SegmentConfig, Weigher};
use crate::error::Result;

/// Callback invoked when an entry leaves the store
///
/// Fires on capacity eviction and explicit deletion, never on value
/// overwrite or reads. The hook runs after the entry has fully left the
/// store, so it may freely mutate *other* stores (the SLRU demotion wiring
/// relies on this); it cannot touch the store that owns it.
pub type RemovalHook<K, V> = Box<dyn FnMut(K, V) + Send>;

/// Node in the recency doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    weight: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Recency-ordered map with weighted capacity and a removal hook
///
/// Most-recently-used entries sit at the head of the list; eviction pops
/// from the tail. Cumulative weight never exceeds the capacity once a
/// mutating call returns.
pub struct OrderedStore<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
    total_weight: usize,
    weigher: Option<Weigher<V>>,
    hook: Option<RemovalHook<K, V>>,
}

impl<K, V> OrderedStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a store without a removal hook
    pub fn new(config: impl Into<SegmentConfig<V>>) -> Result<Self> {
        Self::build(config.into(), None)
    }

    /// Create a store whose removal hook fires for every evicted or
    /// deleted entry
    pub fn with_removal_hook(
        config: impl Into<SegmentConfig<V>>,
        hook: impl FnMut(K, V) + Send + 'static,
    ) -> Result<Self> {
        Self::build(config.into(), Some(Box::new(hook)))
    }

    fn build(config: SegmentConfig<V>, hook: Option<RemovalHook<K, V>>) -> Result<Self> {
        let (capacity, weigher) = config.into_parts()?;

        // A count-based capacity bounds the entry count, so the index can
        // be pre-sized. A weighted capacity is in weight units (e.g.
        // bytes) and says nothing about how many slots the index needs.
        let map = if weigher.is_none() {
            HashMap::with_capacity_and_hasher(capacity, RandomState::new())
        } else {
            HashMap::with_hasher(RandomState::new())
        };

        Ok(Self {
            map,
            nodes: Vec::new(),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
            total_weight: 0,
            weigher,
            hook,
        })
    }

    /// Get a value and mark it most-recently-used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if let Some(&idx) = self.map.get(key) {
            self.move_to_front(idx);
            self.nodes[idx].as_ref().map(|node| &node.value)
        } else {
            None
        }
    }

    /// Get a value without touching recency order
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map
            .get(key)
            .and_then(|&idx| self.nodes[idx].as_ref())
            .map(|node| &node.value)
    }

    /// Check for a key without touching recency order
    pub fn has(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert or update a key-value pair at the most-recently-used position
    ///
    /// Updating an existing key replaces its value in place without firing
    /// the removal hook. Either path then evicts least-recently-used
    /// entries, hook firing per entry, until the cumulative weight fits the
    /// capacity again.
    pub fn set(&mut self, key: K, value: V) {
        let weight = self.weigh(&value);

        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = self.nodes[idx].as_mut() {
                self.total_weight = self.total_weight - node.weight + weight;
                node.value = value;
                node.weight = weight;
            }
            self.move_to_front(idx);
        } else {
            let idx = self.alloc_node();
            self.nodes[idx] = Some(Node {
                key: key.clone(),
                value,
                weight,
                prev: None,
                next: self.head,
            });

            if let Some(head_idx) = self.head {
                if let Some(head) = self.nodes[head_idx].as_mut() {
                    head.prev = Some(idx);
                }
            }

            self.head = Some(idx);
            if self.tail.is_none() {
                self.tail = Some(idx);
            }

            self.map.insert(key, idx);
            self.total_weight += weight;
        }

        self.evict_to_capacity();
    }

    /// Remove a key, firing the removal hook if the key was present
    ///
    /// Explicit deletion is a removal event identical to eviction for hook
    /// purposes. Returns the removed value.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_node(idx);
        self.total_weight -= node.weight;

        // The hook gets the owned entry like the eviction paths do; the
        // clone for the return value is only paid when a hook exists.
        match self.hook.as_mut() {
            Some(hook) => {
                let value = node.value.clone();
                hook(node.key, node.value);
                Some(value)
            }
            None => Some(node.value),
        }
    }

    /// Remove all entries, firing the removal hook for each
    ///
    /// Entries are removed most-recent-first. Each hook call sees the store
    /// with that entry already gone.
    pub fn reset(&mut self) {
        while let Some((key, value)) = self.pop_front() {
            self.notify(key, value);
        }
        self.nodes.clear();
        self.free_list.clear();
    }

    /// Visit all entries, most-recently-used first
    pub fn for_each(&self, mut visit: impl FnMut(&K, &V)) {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            match self.nodes[idx].as_ref() {
                Some(node) => {
                    visit(&node.key, &node.value);
                    cursor = node.next;
                }
                None => break,
            }
        }
    }

    /// Visit all entries, least-recently-used first
    pub fn for_each_rev(&self, mut visit: impl FnMut(&K, &V)) {
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            match self.nodes[idx].as_ref() {
                Some(node) => {
                    visit(&node.key, &node.value);
                    cursor = node.prev;
                }
                None => break,
            }
        }
    }

    /// Collect all keys, most-recently-used first
    pub fn keys(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.count());
        self.for_each(|key, _| keys.push(key.clone()));
        keys
    }

    /// Collect all values, most-recently-used first
    pub fn values(&self) -> Vec<V> {
        let mut values = Vec::with_capacity(self.count());
        self.for_each(|_, value| values.push(value.clone()));
        values
    }

    /// Get the cumulative weighted size
    pub fn size(&self) -> usize {
        self.total_weight
    }

    /// Get the number of entries
    pub fn count(&self) -> usize {
        self.map.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn weigh(&self, value: &V) -> usize {
        self.weigher.as_ref().map_or(1, |weigher| weigher(value))
    }

    fn notify(&mut self, key: K, value: V) {
        if let Some(hook) = self.hook.as_mut() {
            hook(key, value);
        }
    }

    /// Evict from the tail, one entry at a time, until within capacity
    fn evict_to_capacity(&mut self) {
        while self.total_weight > self.capacity {
            match self.pop_back() {
                Some((key, value)) => self.notify(key, value),
                None => break,
            }
        }
    }

    fn pop_back(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.take_slot(idx)
    }

    fn pop_front(&mut self) -> Option<(K, V)> {
        let idx = self.head?;
        self.take_slot(idx)
    }

    /// Detach the node at `idx` and release its slot; hook not invoked
    fn take_slot(&mut self, idx: usize) -> Option<(K, V)> {
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.map.remove(&node.key);
        self.free_node(idx);
        self.total_weight -= node.weight;
        Some((node.key, node.value))
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);

        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = self.nodes[head_idx].as_mut() {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes[idx].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.nodes[prev_idx].as_mut() {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.nodes[next_idx].as_mut() {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}
