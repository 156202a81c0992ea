//! Read cache for incident lookups, backed by [`moka`].
//!
//! The cache is never authoritative: every entry is a copy of a live
//! record in the primary map, bounded by a time-to-live and a maximum
//! entry count with least-recently-used eviction on overflow. A miss
//! always means "consult the primary store", never "record absent".

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use crate::incident::Incident;

// ── cache stats ──────────────────────────────────────────────────────

/// Counters tracking cache effectiveness.
#[derive(Debug)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Total cache hits since creation.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Total cache misses since creation.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Total lookups (hits + misses).
    pub fn total(&self) -> u64 {
        self.hits() + self.misses()
    }

    /// Hit rate between 0.0 and 1.0 (0.0 if no lookups yet).
    pub fn hit_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.hits() as f64 / total as f64
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} rate={:.2}%",
            self.hits(),
            self.misses(),
            self.hit_rate() * 100.0,
        )
    }
}

// ── read cache ───────────────────────────────────────────────────────

/// Bounded, time-expiring cache of incident records keyed by id.
///
/// Cheaply cloneable; clones share the same underlying cache and stats.
#[derive(Clone)]
pub struct ReadCache {
    inner: Cache<u64, Incident>,
    stats: Arc<CacheStats>,
}

impl ReadCache {
    /// Start building a cache. Defaults: 1000 entries, 600 second TTL.
    pub fn builder() -> ReadCacheBuilder {
        ReadCacheBuilder {
            max_capacity: 1000,
            ttl: Duration::from_secs(600),
        }
    }

    /// Look up a cached record by id. Returns `None` on miss or expiry.
    pub fn get(&self, id: u64) -> Option<Incident> {
        match self.inner.get(&id) {
            Some(incident) => {
                self.stats.record_hit();
                debug!(id, "cache hit");
                Some(incident)
            }
            None => {
                self.stats.record_miss();
                debug!(id, "cache miss");
                None
            }
        }
    }

    /// Insert or replace the cached copy of a record.
    pub fn insert(&self, incident: &Incident) {
        debug!(id = incident.id, "cache insert");
        self.inner.insert(incident.id, incident.clone());
    }

    /// Drop the cached entry for `id`, if any.
    pub fn invalidate(&self, id: u64) {
        debug!(id, "cache invalidate");
        self.inner.invalidate(&id);
    }

    /// Current number of cached entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Hit/miss counters for observability surfaces.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl Default for ReadCache {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ── builder ──────────────────────────────────────────────────────────

/// Builder for [`ReadCache`].
pub struct ReadCacheBuilder {
    max_capacity: u64,
    ttl: Duration,
}

impl ReadCacheBuilder {
    /// Maximum number of entries the cache will hold.
    pub fn max_capacity(mut self, cap: u64) -> Self {
        self.max_capacity = cap;
        self
    }

    /// Time-to-live for each entry, measured from its last write.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Build the cache.
    pub fn build(self) -> ReadCache {
        let inner = Cache::builder()
            .max_capacity(self.max_capacity)
            .time_to_live(self.ttl)
            .build();

        debug!(
            max_capacity = self.max_capacity,
            ttl_ms = self.ttl.as_millis() as u64,
            "read cache created"
        );

        ReadCache {
            inner,
            stats: Arc::new(CacheStats::new()),
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────
