//! Incident record types.
//!
//! [`Incident`] is the stored form: its `id` and `status` are always
//! concrete. [`IncidentDraft`] is the input-boundary form where every field
//! is optional; the store resolves defaults and rejects out-of-policy
//! values before a record ever exists.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an incident.
///
/// Serializes as `OPEN` / `IN_PROGRESS` / `CLOSED` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    InProgress,
    Closed,
}

/// A tracked incident record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Unique identifier, assigned exactly once at creation and never
    /// reused after deletion.
    pub id: u64,
    /// Short summary, non-empty and at most 100 characters.
    pub title: String,
    /// Sanitized free-form detail text. Empty when none was supplied.
    pub description: String,
    /// Current lifecycle status.
    pub status: Status,
}

impl Incident {
    /// The content key this record occupies in the dedup index.
    pub fn dedup_key(&self) -> String {
        dedup_key(&self.title, &self.description)
    }
}

/// Derive the content key for a title/description pair.
pub(crate) fn dedup_key(title: &str, description: &str) -> String {
    format!("{title}:{description}")
}

/// Client-supplied incident data, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncidentDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
}

impl IncidentDraft {
    /// Draft with a title and description and no explicit status.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            status: None,
        }
    }

    /// Set an explicit status on the draft.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }
}

// ── tests ────────────────────────────────────────────────────────────
