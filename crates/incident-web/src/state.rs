//! Shared application state for the web server.

use incident_store::IncidentStore;

use crate::WebConfig;

/// Shared state accessible from every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// The incident store backing all routes.
    pub store: IncidentStore,
    /// Web server configuration.
    pub config: WebConfig,
}
