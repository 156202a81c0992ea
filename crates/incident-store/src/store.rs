//! The incident store facade.
//!
//! [`IncidentStore`] orchestrates the primary map, the dedup index, the id
//! sequence, and the read cache behind the five public operations, and owns
//! every cross-structure invariant: a record becomes visible only after its
//! content key is claimed, the cache only ever holds copies of live primary
//! entries, and identifiers are minted once and never reused.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, ReadCache};
use crate::dedup::{Claim, DedupIndex};
use crate::error::{StoreError, StoreResult};
use crate::incident::{Incident, IncidentDraft, Status, dedup_key};
use crate::sanitize::sanitize;
use crate::sequence::IdSequence;

/// Maximum accepted title length in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Concurrent in-memory incident store.
///
/// Cheaply cloneable (all fields are `Arc`-backed); clones share the same
/// state. Every operation takes `&self` and is safe to call from any
/// number of threads without external locking.
#[derive(Clone)]
pub struct IncidentStore {
    records: Arc<DashMap<u64, Incident>>,
    dedup: DedupIndex,
    ids: Arc<IdSequence>,
    cache: ReadCache,
}

impl IncidentStore {
    /// Create a store with the default read cache (1000 entries, 600
    /// second TTL).
    pub fn new() -> Self {
        Self::with_cache(ReadCache::default())
    }

    /// Create a store around a pre-configured read cache.
    pub fn with_cache(cache: ReadCache) -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            dedup: DedupIndex::new(),
            ids: Arc::new(IdSequence::new()),
            cache,
        }
    }

    /// Create a new incident, or return the existing record when one with
    /// the same title and description is already live.
    ///
    /// Duplicate content is a lookup, not an error: repeating a create
    /// with identical content returns the same record both times. The new
    /// record is published inside the content-key claim, so a losing
    /// concurrent create always finds the winner's record.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidArgument`] when the status is set to anything
    /// but `OPEN`, or the title is missing, blank, or longer than
    /// [`MAX_TITLE_LEN`] characters. [`StoreError::IndexOutOfSync`] when
    /// the content key is claimed but no record holds it (reachable only
    /// through the delete window, where the record is removed before its
    /// key is released).
    pub fn create(&self, draft: IncidentDraft) -> StoreResult<Incident> {
        match draft.status {
            None | Some(Status::Open) => {}
            Some(status) => {
                return Err(StoreError::InvalidArgument(format!(
                    "status must be unset or OPEN at creation, got {status:?}"
                )));
            }
        }

        let (title, description, status) = resolve_draft(draft)?;
        let key = dedup_key(&title, &description);

        let claim = self.dedup.claim_or_existing(&key, || {
            let id = self.ids.next_id();
            let incident = Incident {
                id,
                title,
                description,
                status,
            };
            self.records.insert(id, incident.clone());
            self.cache.insert(&incident);
            (id, incident)
        });

        match claim {
            Claim::Won(incident) => {
                info!(id = incident.id, title = %incident.title, "incident created");
                Ok(incident)
            }
            Claim::Lost(existing_id) => {
                warn!(id = existing_id, key = %key, "duplicate incident content");
                match self.records.get(&existing_id) {
                    Some(entry) => Ok(entry.value().clone()),
                    None => {
                        error!(id = existing_id, key = %key, "claimed key has no record");
                        Err(StoreError::IndexOutOfSync { key })
                    }
                }
            }
        }
    }

    /// Point-in-time snapshot of all live incidents. Order is unspecified.
    pub fn list(&self) -> Vec<Incident> {
        let snapshot: Vec<Incident> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        debug!(count = snapshot.len(), "listing incidents");
        snapshot
    }

    /// Look up an incident by id, consulting the read cache first and
    /// repopulating it on a primary-store hit.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidArgument`] when `id` is zero.
    pub fn get(&self, id: u64) -> StoreResult<Option<Incident>> {
        validate_id(id)?;

        if let Some(incident) = self.cache.get(id) {
            return Ok(Some(incident));
        }

        match self.records.get(&id) {
            Some(entry) => {
                let incident = entry.value().clone();
                self.cache.insert(&incident);
                Ok(Some(incident))
            }
            None => {
                debug!(id, "incident not found");
                Ok(None)
            }
        }
    }

    /// Replace the record stored under `id`, writing through to the cache.
    /// Returns `None` when no such incident exists.
    ///
    /// A missing status defaults to `OPEN`; any concrete status is
    /// accepted (this is how incidents move to `IN_PROGRESS` or `CLOSED`).
    ///
    /// The record swap itself is atomic (it happens under the primary
    /// map's entry lock), but releasing the old content key and claiming
    /// the new one are two separate steps after it. A concurrent `create`
    /// landing between them can win the old key or find the new key
    /// already held; callers needing a stricter guarantee must serialize
    /// updates against creates. The key swap deliberately happens outside
    /// the entry lock: `create` publishes records while holding a dedup
    /// key lock, so touching the index while holding a record lock would
    /// invert that order.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidArgument`] when `id` is zero or the draft
    /// fails the same title/description policy as `create`.
    pub fn update(&self, id: u64, draft: IncidentDraft) -> StoreResult<Option<Incident>> {
        validate_id(id)?;
        let (title, description, status) = resolve_draft(draft)?;
        let updated = Incident {
            id,
            title,
            description,
            status,
        };

        let old_key = {
            let Some(mut entry) = self.records.get_mut(&id) else {
                warn!(id, "update of non-existent incident");
                return Ok(None);
            };
            let old_key = entry.dedup_key();
            *entry = updated.clone();
            old_key
        };

        let new_key = updated.dedup_key();
        if old_key != new_key {
            self.dedup.release(&old_key, id);
            // A losing claim leaves the other record's ownership
            // untouched; the update still proceeds.
            if !self.dedup.try_claim(&new_key, id) {
                warn!(id, key = %new_key, "updated content collides with a live record");
            }
        }

        self.cache.insert(&updated);
        info!(id, status = ?updated.status, "incident updated");
        Ok(Some(updated))
    }

    /// Delete the incident stored under `id`, releasing its content key
    /// and invalidating its cache entry. Returns `false` when absent.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidArgument`] when `id` is zero.
    pub fn delete(&self, id: u64) -> StoreResult<bool> {
        validate_id(id)?;

        match self.records.remove(&id) {
            Some((_, incident)) => {
                self.dedup.release(&incident.dedup_key(), id);
                self.cache.invalidate(id);
                info!(id, "incident deleted");
                Ok(true)
            }
            None => {
                warn!(id, "delete of non-existent incident");
                Ok(false)
            }
        }
    }

    /// Number of live incidents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no incidents.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-cache hit/miss counters for observability surfaces.
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }
}

impl Default for IncidentStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── validation ───────────────────────────────────────────────────────

fn validate_id(id: u64) -> StoreResult<()> {
    if id == 0 {
        error!("invalid incident id: 0");
        return Err(StoreError::InvalidArgument(
            "id must be a positive integer".into(),
        ));
    }
    Ok(())
}

/// Resolve a draft into concrete record fields, rejecting out-of-policy
/// input. The description is sanitized; a missing status becomes `OPEN`.
fn resolve_draft(draft: IncidentDraft) -> StoreResult<(String, String, Status)> {
    let title = draft
        .title
        .ok_or_else(|| StoreError::InvalidArgument("title is required".into()))?;
    if title.trim().is_empty() {
        return Err(StoreError::InvalidArgument("title must not be blank".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(StoreError::InvalidArgument(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }

    let description = sanitize(&draft.description.unwrap_or_default());
    let status = draft.status.unwrap_or(Status::Open);
    Ok((title, description, status))
}

// ── tests ────────────────────────────────────────────────────────────
