//! End-to-end tests for the incident REST API.
//!
//! Each test boots the full router on an ephemeral port and drives it
//! with a real HTTP client, covering the status-code mapping: 201 on
//! create (including the duplicate case), 400 on policy violations,
//! 404 on absent records, 204 on delete.

use incident_store::IncidentStore;
use incident_web::{WebConfig, WebServer};
use serde_json::{Value, json};

async fn spawn_server() -> String {
    let server = WebServer::new(WebConfig::default(), IncidentStore::new());
    let router = server.router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn create_and_fetch() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/incidents"))
        .json(&json!({ "title": "Disk full", "description": "/var at 100%" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_u64().unwrap();
    assert!(id >= 1);
    assert_eq!(created["status"], "OPEN");

    let fetched: Value = client
        .get(format!("{base}/api/incidents/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_create_returns_existing_record() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let body = json!({ "title": "Stress Test Incident", "description": "Created during stress testing" });

    let first: Value = client
        .post(format!("{base}/api/incidents"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let resp = client
        .post(format!("{base}/api/incidents"))
        .json(&body)
        .send()
        .await
        .unwrap();
    // Still a success, carrying the record created the first time.
    assert_eq!(resp.status(), 201);
    let second: Value = resp.json().await.unwrap();
    assert_eq!(second["id"], first["id"]);

    let listed: Value = client
        .get(format!("{base}/api/incidents"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_inputs_are_bad_requests() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    // Creation-time status other than OPEN.
    let resp = client
        .post(format!("{base}/api/incidents"))
        .json(&json!({ "title": "t", "status": "CLOSED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Missing title.
    let resp = client
        .post(format!("{base}/api/incidents"))
        .json(&json!({ "description": "d" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Title over the length bound.
    let resp = client
        .post(format!("{base}/api/incidents"))
        .json(&json!({ "title": "x".repeat(101) }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Zero id.
    let resp = client
        .get(format!("{base}/api/incidents/0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn description_is_sanitized() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{base}/api/incidents"))
        .json(&json!({ "title": "t", "description": "  <script>alert(1)</script> hi  " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["description"], "alert(1) hi");
}

#[tokio::test]
async fn update_and_delete_lifecycle() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{base}/api/incidents"))
        .json(&json!({ "title": "Disk full", "description": "/var at 100%" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_u64().unwrap();

    // Close it via update; same id.
    let resp = client
        .put(format!("{base}/api/incidents/{id}"))
        .json(&json!({ "title": "Disk full", "description": "/var at 100%", "status": "CLOSED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["id"].as_u64(), Some(id));
    assert_eq!(updated["status"], "CLOSED");

    // Delete, then every route reports the record gone.
    let resp = client
        .delete(format!("{base}/api/incidents/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/api/incidents/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{base}/api/incidents/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Updating the deleted id is also a 404.
    let resp = client
        .put(format!("{base}/api/incidents/{id}"))
        .json(&json!({ "title": "t" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn status_endpoint_reports_counts() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/api/incidents"))
        .json(&json!({ "title": "t", "description": "d" }))
        .send()
        .await
        .unwrap();

    let status: Value = client
        .get(format!("{base}/api/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["status"], "ok");
    assert_eq!(status["incident_count"].as_u64(), Some(1));
    assert!(status["cache"]["hits"].is_u64());
    assert!(status["cache"]["misses"].is_u64());
}

#[test]
fn web_config_defaults() {
    let config = WebConfig::default();
    assert_eq!(config.bind_addr, "127.0.0.1");
    assert_eq!(config.port, 8080);
}
