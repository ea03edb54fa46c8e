//! REST API Routes Module
//!
//! This module contains all REST API route handlers.
//!
//! Includes:
//! - Aggregated and kind-scoped search
//! - Suggestion and popular-query lookups
//! - Per-user search history
//! - Health check endpoints (Kubernetes-compatible)
//! - CORS support for browser-based clients

pub mod health;
pub mod history;
pub mod search;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, header::HeaderName, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use skillet_search::SearchService;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::openapi::ApiDoc;

// Re-export route creation functions for convenience
pub use health::create_router as health_router;
pub use history::create_router as history_router;
pub use search::create_router as search_router;

// ============================================================================
// OPENAPI ENDPOINTS
// ============================================================================

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ============================================================================
// API ROUTER
// ============================================================================

/// Create the complete API router.
///
/// This function creates a fully configured Axum router with:
/// - Search endpoints under /api/v1/search
/// - History endpoints under /api/v1/search/history
/// - Health checks at /health/* (public)
/// - OpenAPI spec at /openapi.json
/// - Swagger UI at /swagger-ui (when the swagger-ui feature is enabled)
pub fn create_api_router(service: Arc<SearchService>, config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .nest("/search", search::create_router(service.clone()))
        .nest("/search/history", history::create_router(service.clone()));

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        // Health checks (public)
        .nest("/health", health::create_router(service))
        // OpenAPI spec
        .route("/openapi.json", get(openapi_json));

    // Add Swagger UI if swagger-ui feature is enabled. The UI reads the
    // spec from the /openapi.json route registered above rather than
    // registering its own copy of that path.
    #[cfg(feature = "swagger-ui")]
    {
        use utoipa_swagger_ui::{Config, SwaggerUi};
        router = router.merge(SwaggerUi::new("/swagger-ui").config(Config::from("/openapi.json")));
    }

    router.layer(build_cors_layer(config))
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-user-id"),
        ])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if !config.is_production() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        // Production mode: only allow configured origins
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}
