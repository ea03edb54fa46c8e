//! Skillet API Server Entry Point
//!
//! Bootstraps tracing, seeds the in-memory catalog, and starts the
//! Axum HTTP server.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use skillet_api::{create_api_router, ApiConfig, ApiError, ApiResult};
use skillet_search::{SearchBackends, SearchConfig, SearchService};
use skillet_storage::{InMemoryCatalog, InMemoryHistoryStore, SeedData};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing();

    let catalog = InMemoryCatalog::new();
    load_seed(&catalog)?;

    let backends = SearchBackends::in_memory(catalog, InMemoryHistoryStore::new());
    let service = Arc::new(SearchService::new(backends, SearchConfig::from_env()));

    let api_config = ApiConfig::from_env();
    let app: Router = create_api_router(service, &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting Skillet API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("SKILLET_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("SKILLET_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Load seed content into the catalog when SKILLET_SEED_PATH is set.
///
/// Without the variable the server starts with an empty catalog, which
/// is the normal mode for tests and for deployments that ingest content
/// through other channels.
fn load_seed(catalog: &InMemoryCatalog) -> ApiResult<()> {
    let path = match std::env::var("SKILLET_SEED_PATH") {
        Ok(path) => path,
        Err(_) => return Ok(()),
    };

    let seed = SeedData::from_path(Path::new(&path))?;
    let inserted = seed.apply(catalog)?;
    tracing::info!(%path, inserted, "Seeded catalog from file");
    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("SKILLET_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("SKILLET_API_PORT").ok())
        .unwrap_or_else(|| "3000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
