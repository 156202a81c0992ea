//! Web interface for incidentd.
//!
//! Exposes the incident store over a REST API:
//!
//! - `POST /api/incidents` creates an incident (duplicate content returns
//!   the existing record, still a success).
//! - `GET /api/incidents` lists all incidents.
//! - `GET /api/incidents/{id}`, `PUT /api/incidents/{id}` and
//!   `DELETE /api/incidents/{id}` operate on a single record.
//! - `GET /api/status` reports record count and read-cache statistics.
//!
//! The layer is a thin translation: `InvalidArgument` becomes 400, a
//! missing record becomes 404, and every invariant lives in the store.

pub mod api;
pub mod server;
pub mod state;

pub use server::WebServer;
pub use state::AppState;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 8080,
        }
    }
}
