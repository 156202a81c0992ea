//! Content deduplication index.
//!
//! Maps a record's content key (derived from title and description) to the
//! id of the live record holding it. Backing the index with a map rather
//! than a bare set lets duplicate detection resolve directly to the
//! existing record without scanning the primary store.
//!
//! Claims go through [`DashMap::entry`], which holds the shard write lock
//! for the key while deciding, so concurrent claimants of the same key see
//! exactly one winner. The winning claimant's `publish` closure also runs
//! under that lock: whatever it makes visible is visible before any other
//! claimant can observe the key as taken.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Outcome of claiming a content key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim<T> {
    /// The key was free; the caller's `publish` closure ran under the
    /// key's lock and produced this value.
    Won(T),
    /// The key is already held by the record with the given id.
    Lost(u64),
}

/// Concurrent content-key index. Cheaply cloneable and `Send + Sync`.
#[derive(Clone, Default)]
pub struct DedupIndex {
    keys: Arc<DashMap<String, u64>>,
}

impl DedupIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim `key`. When the key is free, `publish` runs while
    /// the key's shard lock is held and must return the claiming id along
    /// with a caller-chosen value; the key is then bound to that id.
    /// When the key is already held, `publish` does not run.
    pub fn claim_or_existing<T>(&self, key: &str, publish: impl FnOnce() -> (u64, T)) -> Claim<T> {
        match self.keys.entry(key.to_string()) {
            Entry::Occupied(entry) => Claim::Lost(*entry.get()),
            Entry::Vacant(entry) => {
                let (id, value) = publish();
                entry.insert(id);
                Claim::Won(value)
            }
        }
    }

    /// Claim `key` for an existing record. Returns `false` (leaving the
    /// current owner untouched) when the key is already held.
    pub fn try_claim(&self, key: &str, id: u64) -> bool {
        match self.keys.entry(key.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(id);
                true
            }
        }
    }

    /// Release `key`, but only if it is still owned by `id`. Returns
    /// whether the key was removed.
    pub fn release(&self, key: &str, id: u64) -> bool {
        self.keys.remove_if(key, |_, owner| *owner == id).is_some()
    }

    /// Look up the id currently holding `key`.
    pub fn resolve(&self, key: &str) -> Option<u64> {
        self.keys.get(key).map(|entry| *entry.value())
    }

    /// Number of claimed keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys are claimed.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ── tests ────────────────────────────────────────────────────────────
