use std::collections::{BTreeMap, HashMap};

use crate::cache::fingerprint::{CacheFingerprint, PackedKey};
use crate::raster::image::RasterImage;
use crate::tiles::tileset::TileSet;

/// Storage cost of a cached value, in bytes.
pub trait CacheCost {
    /// Bytes this value holds on to.
    fn cost_bytes(&self) -> usize;
}

impl CacheCost for RasterImage {
    fn cost_bytes(&self) -> usize {
        RasterImage::cost_bytes(self)
    }
}

impl CacheCost for TileSet {
    fn cost_bytes(&self) -> usize {
        TileSet::cost_bytes(self)
    }
}

/// Running counters for a [`RenderCache`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries dropped to make room.
    pub evictions: u64,
    /// Inserts refused because the value alone exceeds capacity.
    pub skipped_oversized: u64,
    /// Wholesale clears.
    pub invalidations: u64,
}

#[derive(Debug)]
struct CacheEntry<V> {
    fingerprint: CacheFingerprint,
    value: V,
    cost: usize,
    tick: u64,
}

/// Bounded content-addressable store of rendered chrome.
///
/// Entries are keyed by [`PackedKey`] and evicted least-recently-used first (recency is updated by
/// lookups as well as inserts) so that the summed cost never exceeds the capacity. Values are
/// expected to be cheap to clone, like the `Arc`-backed [`RasterImage`] and [`TileSet`].
#[derive(Debug)]
pub struct RenderCache<V = RasterImage> {
    capacity: usize,
    total_cost: usize,
    entries: HashMap<PackedKey, CacheEntry<V>>,
    // tick -> key, oldest first.
    recency: BTreeMap<u64, PackedKey>,
    next_tick: u64,
    stats: CacheStats,
}

impl<V: CacheCost + Clone> RenderCache<V> {
    /// Empty cache holding at most `capacity_bytes`.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity: capacity_bytes,
            total_cost: 0,
            entries: HashMap::new(),
            recency: BTreeMap::new(),
            next_tick: 0,
            stats: CacheStats::default(),
        }
    }

    /// Configured capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Summed cost of every entry.
    pub fn total_cost(&self) -> usize {
        self.total_cost
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Return `true` if `fp` is cached, without touching recency or stats.
    pub fn contains(&self, fp: &CacheFingerprint) -> bool {
        self.entries.contains_key(&fp.key())
    }

    /// Fetch the value for `fp` and mark it most recently used.
    pub fn lookup(&mut self, fp: &CacheFingerprint) -> Option<V> {
        let key = fp.key();
        let tick = self.bump();
        let Some(entry) = self.entries.get_mut(&key) else {
            self.stats.misses += 1;
            tracing::trace!(key = ?key, "render cache miss");
            return None;
        };
        debug_assert_eq!(&entry.fingerprint, fp);
        self.recency.remove(&entry.tick);
        entry.tick = tick;
        self.recency.insert(tick, key);
        self.stats.hits += 1;
        tracing::trace!(key = ?key, "render cache hit");
        Some(entry.value.clone())
    }

    /// Store `value` under `fp`, evicting least-recently-used entries until it fits.
    ///
    /// A value whose cost alone exceeds the capacity is not stored; the caller keeps using its
    /// own copy. Returns whether the value was stored.
    pub fn insert(&mut self, fp: CacheFingerprint, value: V) -> bool {
        let key = fp.key();
        let cost = value.cost_bytes();
        if cost > self.capacity {
            self.stats.skipped_oversized += 1;
            tracing::debug!(
                key = ?key,
                cost,
                capacity = self.capacity,
                "render cache insert skipped: entry exceeds capacity"
            );
            return false;
        }

        if let Some(old) = self.entries.remove(&key) {
            self.recency.remove(&old.tick);
            self.total_cost -= old.cost;
        }
        self.evict_to(self.capacity - cost);

        let tick = self.bump();
        self.recency.insert(tick, key);
        self.total_cost += cost;
        self.entries.insert(
            key,
            CacheEntry {
                fingerprint: fp,
                value,
                cost,
                tick,
            },
        );
        true
    }

    /// Return the cached value for `fp`, producing and inserting it on a miss.
    pub fn lookup_or_insert_with(
        &mut self,
        fp: CacheFingerprint,
        produce: impl FnOnce() -> V,
    ) -> V {
        if let Some(v) = self.lookup(&fp) {
            return v;
        }
        let v = produce();
        self.insert(fp, v.clone());
        v
    }

    /// Drop every entry. Capacity is unchanged.
    pub fn invalidate_all(&mut self) {
        tracing::debug!(
            entries = self.entries.len(),
            bytes = self.total_cost,
            "render cache invalidated"
        );
        self.entries.clear();
        self.recency.clear();
        self.total_cost = 0;
        self.stats.invalidations += 1;
    }

    /// Change the capacity, evicting down to it if it shrank.
    pub fn set_capacity(&mut self, capacity_bytes: usize) {
        self.capacity = capacity_bytes;
        self.evict_to(capacity_bytes);
    }

    fn bump(&mut self) -> u64 {
        let t = self.next_tick;
        self.next_tick += 1;
        t
    }

    fn evict_to(&mut self, budget: usize) {
        while self.total_cost > budget {
            let Some((_, key)) = self.recency.pop_first() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&key) {
                self.total_cost -= entry.cost;
                self.stats.evictions += 1;
                tracing::debug!(
                    key = ?key,
                    cost = entry.cost,
                    total = self.total_cost,
                    "render cache evicted entry"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/render_cache.rs"]
mod tests;
