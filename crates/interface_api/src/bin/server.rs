//! Claims Façade - API Server Binary
//!
//! This binary starts the HTTP API server in front of the hosted claims table.
//!
//! # Usage
//!
//! ```bash
//! SUPABASE_ENDPOINT=https://abc.supabase.co \
//! SUPABASE_SERVICE_ROLE_KEY=... \
//! TABLE_NAME=claims \
//! cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `SUPABASE_ENDPOINT` - Base URL of the hosted database project (required)
//! * `SUPABASE_SERVICE_ROLE_KEY` - Service-role access key (preferred)
//! * `SUPABASE_KEY` - Access key used when no service-role key is set
//! * `TABLE_NAME` - Name of the claims table (required)
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use infra_store::{RestClaimsAdapter, StoreConfig};
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the store client,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - An `API_*` variable cannot be parsed (e.g. a non-numeric port)
/// - Store configuration is missing from the environment
/// - The store client cannot be built
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Invalid API configuration")?;

    init_tracing(&config.log_level, config.log_json);

    let store_config = StoreConfig::from_env().context("Failed to load store configuration")?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        endpoint = %store_config.endpoint,
        table = %store_config.table_name,
        "Starting claims API server"
    );

    let adapter = RestClaimsAdapter::new(&store_config).context("Failed to create store client")?;

    let app = create_router(Arc::new(adapter));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `json` - Emit JSON lines instead of human-readable output
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
