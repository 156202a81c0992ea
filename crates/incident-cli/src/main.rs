//! incidentd: in-memory incident tracking service.
//!
//! Composes the store, the web server, and logging into a single binary.
//! Records live only for the process lifetime; there is no persistence.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use incident_store::{IncidentStore, ReadCache};
use incident_web::{WebConfig, WebServer};

#[derive(Parser)]
#[command(name = "incidentd", version, about = "In-memory incident tracking service")]
struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Maximum number of entries in the read cache.
    #[arg(long, default_value_t = 1000)]
    cache_capacity: u64,

    /// Read-cache entry time-to-live in seconds.
    #[arg(long, default_value_t = 600)]
    cache_ttl_secs: u64,

    /// Default log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let cache = ReadCache::builder()
        .max_capacity(cli.cache_capacity)
        .ttl(Duration::from_secs(cli.cache_ttl_secs))
        .build();
    let store = IncidentStore::with_cache(cache);

    let config = WebConfig {
        bind_addr: cli.bind,
        port: cli.port,
    };

    tracing::info!(
        cache_capacity = cli.cache_capacity,
        cache_ttl_secs = cli.cache_ttl_secs,
        "incidentd starting"
    );

    WebServer::new(config, store)
        .start()
        .await
        .map_err(|err| anyhow::anyhow!("server error: {err}"))?;

    Ok(())
}

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
