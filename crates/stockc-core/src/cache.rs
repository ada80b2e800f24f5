//! Fixed-capacity, TTL-based history cache.
//!
//! Policy:
//! - Keyed by exact [`Symbol`] match
//! - Absolute age TTL measured from `fetched_at`
//! - At most `capacity` entries, held in indexed slots
//! - On insert: overwrite the slot already holding the symbol, else reuse the
//!   first empty or expired slot, else evict the entry with the oldest
//!   `fetched_at`
//!
//! Lookups take a shared lock and never mutate; inserts take the exclusive lock,
//! so a reader never observes a half-written entry.

use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::{PriceSeries, Symbol};

pub const DEFAULT_CAPACITY: usize = 16;
/// Daily closes change once per trading day.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A cached series and the time it was fetched from upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedHistory {
    pub series: PriceSeries,
    pub fetched_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    symbol: Symbol,
    fetched_at: OffsetDateTime,
    series: PriceSeries,
}

impl CacheEntry {
    fn to_cached(&self) -> CachedHistory {
        CachedHistory {
            series: self.series.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

#[derive(Debug)]
struct CacheInner {
    slots: Vec<Option<CacheEntry>>,
    ttl: Duration,
}

impl CacheInner {
    fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            slots: vec![None; capacity],
            ttl,
        }
    }

    fn is_fresh(&self, entry: &CacheEntry, now: OffsetDateTime) -> bool {
        now - entry.fetched_at < self.ttl
    }

    fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.slots.iter().flatten()
    }

    fn find_fresh(&self, symbol: &Symbol, now: OffsetDateTime) -> Option<&CacheEntry> {
        self.entries()
            .find(|entry| entry.symbol == *symbol && self.is_fresh(entry, now))
    }

    fn find_any(&self, symbol: &Symbol) -> Option<&CacheEntry> {
        self.entries().find(|entry| entry.symbol == *symbol)
    }

    /// Stores the entry and returns the symbol of a still-valid entry it displaced, if any.
    fn insert(&mut self, entry: CacheEntry, now: OffsetDateTime) -> Option<Symbol> {
        let same_symbol = self.slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|existing| existing.symbol == entry.symbol)
        });
        if let Some(index) = same_symbol {
            self.slots[index] = Some(entry);
            return None;
        }

        let reusable = self.slots.iter().position(|slot| match slot {
            None => true,
            Some(existing) => !self.is_fresh(existing, now),
        });
        if let Some(index) = reusable {
            self.slots[index] = Some(entry);
            return None;
        }

        let mut oldest_index = 0;
        let mut oldest_time: Option<OffsetDateTime> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(existing) = slot {
                if oldest_time.map_or(true, |oldest| existing.fetched_at < oldest) {
                    oldest_time = Some(existing.fetched_at);
                    oldest_index = index;
                }
            }
        }

        self.slots[oldest_index]
            .replace(entry)
            .map(|displaced| displaced.symbol)
    }

    fn len(&self) -> usize {
        self.entries().count()
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

/// Thread-safe history cache shared by handle across workers.
#[derive(Debug, Clone)]
pub struct HistoryCache {
    inner: Arc<RwLock<CacheInner>>,
    clock: Arc<dyn Clock>,
    capacity: usize,
    ttl: Duration,
}

impl HistoryCache {
    /// Creates a cache with `capacity` slots (at least one) and an absolute-age TTL.
    pub fn new(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(RwLock::new(CacheInner::new(capacity, ttl))),
            clock,
            capacity,
            ttl,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL, Arc::new(SystemClock))
    }

    /// Returns the series for `symbol` if an entry exists and is younger than the TTL.
    pub async fn get(&self, symbol: &Symbol) -> Option<CachedHistory> {
        let now = self.clock.now();
        let store = self.inner.read().await;
        store.find_fresh(symbol, now).map(CacheEntry::to_cached)
    }

    /// Returns the series for `symbol` whatever its age.
    pub async fn get_stale(&self, symbol: &Symbol) -> Option<CachedHistory> {
        let store = self.inner.read().await;
        store.find_any(symbol).map(CacheEntry::to_cached)
    }

    /// Same expiry test as [`get`](Self::get), without cloning the payload.
    pub async fn is_valid(&self, symbol: &Symbol) -> bool {
        let now = self.clock.now();
        let store = self.inner.read().await;
        store.find_fresh(symbol, now).is_some()
    }

    /// Stores `series` under `symbol` stamped with the current time, and returns that time.
    pub async fn set(&self, symbol: Symbol, series: PriceSeries) -> OffsetDateTime {
        let mut store = self.inner.write().await;
        let now = self.clock.now();
        let entry = CacheEntry {
            symbol: symbol.clone(),
            fetched_at: now,
            series,
        };

        if let Some(evicted) = store.insert(entry, now) {
            tracing::debug!(%evicted, inserted = %symbol, "history cache full; evicted oldest entry");
        }
        now
    }

    /// Number of occupied slots, expired entries included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Current time on the cache's clock.
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}
