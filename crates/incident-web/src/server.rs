//! Web server setup and startup.
//!
//! [`WebServer`] composes the Axum router, registers all routes, and
//! starts the HTTP listener. CORS is permissive so browser frontends on
//! other origins can drive the API.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};

use incident_store::IncidentStore;

use crate::WebConfig;
use crate::api;
use crate::state::AppState;

/// The incidentd web server.
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server around a store.
    pub fn new(config: WebConfig, store: IncidentStore) -> Self {
        let state = Arc::new(AppState {
            store,
            config: config.clone(),
        });
        Self { config, state }
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.bind_addr, self.config.port)
    }

    /// Build the Axum router with all routes registered.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any);

        Router::new()
            .route("/api/status", get(api::status))
            .route("/api/incidents", get(api::list_incidents))
            .route("/api/incidents", post(api::create_incident))
            .route("/api/incidents/{id}", get(api::get_incident))
            .route("/api/incidents/{id}", put(api::update_incident))
            .route("/api/incidents/{id}", delete(api::delete_incident))
            .layer(cors)
            .with_state(Arc::clone(&self.state))
    }

    /// Start the server and block until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot be bound.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr();
        let router = self.router();

        tracing::info!(addr = %addr, "starting web server");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
