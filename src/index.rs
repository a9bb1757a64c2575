//! Separate-chaining index from string keys to ordered chains of values.

use std::collections::HashMap;

use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::hash::{HashFunction, KeyBuildHasher};

// =============================================================================
// Configuration
// =============================================================================

pub const DEFAULT_CAPACITY: usize = 16;
pub const DEFAULT_LOAD_FACTOR: f64 = 2.0;

/// Construction parameters for a [`ChainedIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig {
    /// Starting table size hint.
    pub initial_capacity: usize,
    /// Resize runs after an insert that leaves `records / keys` above this.
    pub load_factor_threshold: f64,
    /// Hash used to place keys in the slot map.
    pub hash_function: HashFunction,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR,
            hash_function: HashFunction::General,
        }
    }
}

impl IndexConfig {
    pub fn with_hash_function(mut self, hash_function: HashFunction) -> Self {
        self.hash_function = hash_function;
        self
    }

    fn sanitized(self) -> Self {
        let load_factor_threshold =
            if self.load_factor_threshold.is_finite() && self.load_factor_threshold > 0.0 {
                self.load_factor_threshold
            } else {
                DEFAULT_LOAD_FACTOR
            };
        Self {
            initial_capacity: self.initial_capacity.max(1),
            load_factor_threshold,
            hash_function: self.hash_function,
        }
    }
}

/// Point-in-time accounting for a [`ChainedIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IndexStats {
    pub distinct_keys: usize,
    pub total_records: usize,
    /// Reported table size. Grows on resize, never shrinks.
    pub capacity: usize,
    pub resizes: usize,
    pub longest_chain: usize,
    /// Keys that landed in a slot already holding a different key.
    pub hash_collisions: usize,
}

// =============================================================================
// Chains
// =============================================================================

type Values<V> = SmallVec<[V; 2]>;

#[derive(Debug, Clone)]
struct Chain<V> {
    key: Box<str>,
    values: Values<V>,
}

// =============================================================================
// ChainedIndex
// =============================================================================

/// String-keyed index resolving collisions by chaining.
///
/// Chains live in `chains` in first-insertion order, which is also the
/// enumeration order of [`ChainedIndex::entries`]. The slot map groups chain
/// positions by key hash; keys sharing a hash share a slot and are told apart
/// by comparing text.
///
/// Resizing rebuilds the slot map at a larger size but carries every key and
/// chain over unchanged, so the reported capacity is a measurement only.
#[derive(Debug, Clone)]
pub struct ChainedIndex<V> {
    chains: Vec<Chain<V>>,
    slots: HashMap<u64, SmallVec<[usize; 1]>, KeyBuildHasher>,
    total_records: usize,
    capacity: usize,
    load_factor_threshold: f64,
    hash_function: HashFunction,
    resizes: usize,
    hash_collisions: usize,
}

impl<V> ChainedIndex<V> {
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Self {
        let config = config.sanitized();
        Self {
            chains: Vec::new(),
            slots: HashMap::with_capacity_and_hasher(
                config.initial_capacity,
                KeyBuildHasher::default(),
            ),
            total_records: 0,
            capacity: config.initial_capacity,
            load_factor_threshold: config.load_factor_threshold,
            hash_function: config.hash_function,
            resizes: 0,
            hash_collisions: 0,
        }
    }

    /// Total number of records across all chains.
    #[inline]
    pub fn len(&self) -> usize {
        self.total_records
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    #[inline]
    pub fn distinct_key_count(&self) -> usize {
        self.chains.len()
    }

    #[inline]
    pub fn total_record_count(&self) -> usize {
        self.total_records
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    #[inline]
    pub fn hash_function(&self) -> HashFunction {
        self.hash_function
    }

    #[inline]
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// `total_records / distinct_keys`, or `0.0` when empty.
    pub fn load_factor(&self) -> f64 {
        if self.chains.is_empty() {
            0.0
        } else {
            self.total_records as f64 / self.chains.len() as f64
        }
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            distinct_keys: self.chains.len(),
            total_records: self.total_records,
            capacity: self.capacity,
            resizes: self.resizes,
            longest_chain: self.chains.iter().map(|c| c.values.len()).max().unwrap_or(0),
            hash_collisions: self.hash_collisions,
        }
    }

    /// Enumeration position of `key`'s chain.
    pub fn position(&self, key: &str) -> Option<usize> {
        let hash = self.hash_function.hash(key);
        self.position_hashed(key, hash)
    }

    fn position_hashed(&self, key: &str, hash: u64) -> Option<usize> {
        self.slots
            .get(&hash)?
            .iter()
            .copied()
            .find(|&pos| &*self.chains[pos].key == key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// The chain for `key` in insertion order, or an empty slice.
    pub fn lookup(&self, key: &str) -> &[V] {
        self.position(key)
            .map(|pos| self.chains[pos].values.as_slice())
            .unwrap_or(&[])
    }

    /// `(key, chain)` pairs in first-insertion order of the keys.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&str, &[V])> + '_ {
        self.chains.iter().map(|c| (&*c.key, c.values.as_slice()))
    }

    /// Append `value` to the chain for `key`, creating the chain if absent.
    ///
    /// Resizes afterwards if the load factor now exceeds the threshold.
    pub fn insert(&mut self, key: &str, value: V) {
        let hash = self.hash_function.hash(key);
        let pos = match self.position_hashed(key, hash) {
            Some(pos) => pos,
            None => self.push_chain(key, hash),
        };
        self.chains[pos].values.push(value);
        self.total_records += 1;

        if self.load_factor() > self.load_factor_threshold {
            self.resize();
        }
    }

    fn push_chain(&mut self, key: &str, hash: u64) -> usize {
        let pos = self.chains.len();
        self.chains.push(Chain {
            key: key.into(),
            values: SmallVec::new(),
        });
        let slot = self.slots.entry(hash).or_default();
        if !slot.is_empty() {
            self.hash_collisions += 1;
        }
        slot.push(pos);
        pos
    }

    /// Grow the reported capacity and rebuild the slot map.
    ///
    /// The new size is twice the key count rounded up to a power of two, and
    /// never below the current capacity. Every `(hash, positions)` pair is
    /// re-inserted as is; chains are not touched.
    pub fn resize(&mut self) {
        let old_capacity = self.capacity;
        let new_capacity = self
            .chains
            .len()
            .saturating_mul(2)
            .checked_next_power_of_two()
            .unwrap_or(usize::MAX)
            .max(old_capacity);

        let old_slots = std::mem::take(&mut self.slots);
        let mut new_slots =
            HashMap::with_capacity_and_hasher(old_slots.len(), KeyBuildHasher::default());
        for (hash, positions) in old_slots {
            new_slots.insert(hash, positions);
        }

        self.slots = new_slots;
        self.capacity = new_capacity;
        self.resizes += 1;

        debug!(
            old_capacity,
            new_capacity,
            distinct_keys = self.chains.len(),
            total_records = self.total_records,
            "Resized index"
        );
    }
}

impl<V> Default for ChainedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}
