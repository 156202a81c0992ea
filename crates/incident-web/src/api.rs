//! REST API route handlers.
//!
//! Each handler delegates to the store and translates its outcome:
//! `InvalidArgument` maps to 400, an absent record to 404, and the
//! duplicate-create case is a success like any other create.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use incident_store::{Incident, IncidentDraft, StoreError};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Wrapper translating [`StoreError`] into an HTTP response.
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoreError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            StoreError::IndexOutOfSync { .. } => {
                tracing::error!(error = %self.0, "store invariant failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

fn not_found(id: u64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("incident {id} not found") })),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// POST /api/incidents
// ---------------------------------------------------------------------------

/// Create an incident. Duplicate content returns the existing record.
pub async fn create_incident(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<IncidentDraft>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
    let incident = state.store.create(draft)?;
    Ok((StatusCode::CREATED, Json(incident)))
}

// ---------------------------------------------------------------------------
// GET /api/incidents
// ---------------------------------------------------------------------------

/// List all incidents.
pub async fn list_incidents(State(state): State<Arc<AppState>>) -> Json<Vec<Incident>> {
    Json(state.store.list())
}

// ---------------------------------------------------------------------------
// GET /api/incidents/{id}
// ---------------------------------------------------------------------------

/// Fetch a single incident by id.
pub async fn get_incident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    match state.store.get(id)? {
        Some(incident) => Ok(Json(incident).into_response()),
        None => Ok(not_found(id)),
    }
}

// ---------------------------------------------------------------------------
// PUT /api/incidents/{id}
// ---------------------------------------------------------------------------

/// Replace an incident.
pub async fn update_incident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(draft): Json<IncidentDraft>,
) -> Result<Response, ApiError> {
    match state.store.update(id, draft)? {
        Some(incident) => Ok(Json(incident).into_response()),
        None => Ok(not_found(id)),
    }
}

// ---------------------------------------------------------------------------
// DELETE /api/incidents/{id}
// ---------------------------------------------------------------------------

/// Delete an incident.
pub async fn delete_incident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    if state.store.delete(id)? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Response payload for the `/api/status` endpoint.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub incident_count: usize,
    pub cache: CacheSummary,
}

/// Read-cache effectiveness counters.
#[derive(Serialize)]
pub struct CacheSummary {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Return basic service status information.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let stats = state.store.cache_stats();
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        incident_count: state.store.len(),
        cache: CacheSummary {
            hits: stats.hits(),
            misses: stats.misses(),
            hit_rate: stats.hit_rate(),
        },
    })
}
