//! # incident-store
//!
//! Concurrent in-memory incident store for incidentd.
//!
//! Provides atomic identifier assignment, content-based deduplication of
//! newly created records, and a bounded, time-expiring read cache kept
//! consistent with the authoritative map under concurrent access. All
//! operations are synchronous and safe to call from any number of threads
//! without external locking.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  IncidentStore (facade, owns all invariants)  │
//! ├───────────────┬──────────────┬────────────────┤
//! │  DashMap      │  DedupIndex  │  ReadCache     │
//! │  id → record  │  key → id    │  moka TTL/LRU  │
//! ├───────────────┴──────────────┴────────────────┤
//! │  IdSequence (AtomicU64, ids never reused)     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```
//! use incident_store::{IncidentDraft, IncidentStore};
//!
//! let store = IncidentStore::new();
//! let incident = store.create(IncidentDraft::new("Disk full", "/var at 100%"))?;
//! assert_eq!(store.get(incident.id)?.as_ref(), Some(&incident));
//! # Ok::<(), incident_store::StoreError>(())
//! ```

pub mod cache;
pub mod dedup;
pub mod error;
pub mod incident;
pub mod sanitize;
pub mod sequence;
pub mod store;

// ── re-exports ───────────────────────────────────────────────────────

pub use cache::{CacheStats, ReadCache, ReadCacheBuilder};
pub use dedup::{Claim, DedupIndex};
pub use error::{StoreError, StoreResult};
pub use incident::{Incident, IncidentDraft, Status};
pub use sequence::IdSequence;
pub use store::{IncidentStore, MAX_TITLE_LEN};
