//! Memoization storage for the recursive probability queries.
//!
//! Every recursive query is pure in (query kind + parameter, deck multiset,
//! hand), so its result can be reused wherever the same triple comes up
//! again. The cache is bounded: once full, the least recently used entry is
//! evicted.
//!
//! The table sits behind a `Mutex`, so a [`ProbabilityCache`] can be shared
//! across threads. Callers hold the lock only for a single lookup or insert.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::engine::deck::Deck;
use crate::engine::hand::Hand;

/// Which recursive query a cached value belongs to, with its scalar parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// Dealer busts, standing at `stand_value` or more.
    DealerBust {
        /// Dealer stands once the high total reaches this.
        stand_value: u8,
    },
    /// Dealer finishes on exactly `target`.
    DealerExact {
        /// Final total of interest.
        target: u8,
    },
    /// Player reaches `target` or more without busting.
    PlayerReach {
        /// Total to reach.
        target: u8,
    },
}

/// Full cache key: query, canonical deck and ordered hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Query kind and parameter.
    pub query: Query,
    /// Remaining deck (order-independent by construction).
    pub deck: Deck,
    /// Hand drawn so far, in draw order.
    pub hand: Hand,
}

impl CacheKey {
    /// Assemble a key.
    pub fn new(query: Query, deck: &Deck, hand: &Hand) -> Self {
        Self {
            query,
            deck: *deck,
            hand: hand.clone(),
        }
    }
}

/// Counters describing cache behaviour.
///
/// `misses` equals the number of recursive expansions performed, since every
/// miss is followed by computing and inserting that node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to be computed.
    pub misses: u64,
    /// Entries dropped to respect the capacity.
    pub evictions: u64,
    /// Entries currently stored.
    pub entries: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: f64,
    stamp: u64,
}

/// LRU table: values by key, plus keys ordered by last use.
#[derive(Debug, Clone)]
struct LruTable {
    entries: FxHashMap<CacheKey, Entry>,
    recency: BTreeMap<u64, CacheKey>,
    clock: u64,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl LruTable {
    fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity.min(1 << 16), Default::default()),
            recency: BTreeMap::new(),
            clock: 0,
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn get(&mut self, key: &CacheKey) -> Option<f64> {
        let stamp = self.tick();
        let Some(entry) = self.entries.get_mut(key) else {
            self.misses += 1;
            return None;
        };
        let previous = std::mem::replace(&mut entry.stamp, stamp);
        let value = entry.value;
        if let Some(moved) = self.recency.remove(&previous) {
            self.recency.insert(stamp, moved);
        }
        self.hits += 1;
        Some(value)
    }

    fn insert(&mut self, key: CacheKey, value: f64) {
        if self.capacity == 0 {
            return;
        }
        let stamp = self.tick();

        if let Some(entry) = self.entries.get_mut(&key) {
            let previous = std::mem::replace(&mut entry.stamp, stamp);
            entry.value = value;
            self.recency.remove(&previous);
            self.recency.insert(stamp, key);
            return;
        }

        while self.entries.len() >= self.capacity {
            let Some((_, oldest)) = self.recency.pop_first() else {
                break;
            };
            self.entries.remove(&oldest);
            self.evictions += 1;
            trace!(evictions = self.evictions, "evicted least recently used entry");
        }

        self.recency.insert(stamp, key.clone());
        self.entries.insert(key, Entry { value, stamp });
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.clock = 0;
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries: self.entries.len(),
            capacity: self.capacity,
        }
    }
}

/// Thread-safe bounded memo table for probability queries.
#[derive(Debug)]
pub struct ProbabilityCache {
    table: Mutex<LruTable>,
}

impl ProbabilityCache {
    /// Create an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 disables memoization entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            table: Mutex::new(LruTable::new(capacity)),
        }
    }

    fn table(&self) -> MutexGuard<'_, LruTable> {
        // Entries are plain values; a panic mid-update cannot leave a torn one.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a cached probability, refreshing its recency on a hit.
    pub fn get(&self, key: &CacheKey) -> Option<f64> {
        self.table().get(key)
    }

    /// Store a computed probability, evicting the oldest entry if full.
    pub fn insert(&self, key: CacheKey, value: f64) {
        self.table().insert(key, value);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.table().entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.table().stats()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.table().clear();
    }
}

impl Clone for ProbabilityCache {
    fn clone(&self) -> Self {
        Self {
            table: Mutex::new(self.table().clone()),
        }
    }
}
