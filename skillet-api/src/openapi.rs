//! OpenAPI Specification for Skillet API
//!
//! This module defines the OpenAPI document for the Skillet REST API.
//! It uses utoipa to generate the specification from Rust types and
//! route annotations. The document is served at /openapi.json and
//! drives the Swagger UI.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::history::ClearHistoryResponse;
use crate::routes::{health, history, search};

// Import domain types from skillet-core
use skillet_core::{
    ContentKind, Difficulty, SearchFilters, SearchHistoryEntry, SearchRequest, SearchResponse,
    SearchResult, SearchScope, SearchSuggestion, SortOrder,
};

/// OpenAPI document for the Skillet search API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skillet Search API",
        description = "Cross-entity search over posts, recipes, users, articles, and comments",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Skillet", url = "https://skillet.app")
    ),
    servers(
        (url = "https://api.skillet.app", description = "Production"),
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Search", description = "Aggregated and kind-scoped search with suggestions"),
        (name = "History", description = "Per-user search history"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        // === Search Routes ===
        search::search,
        search::search_posts,
        search::search_recipes,
        search::search_users,
        search::search_articles,
        search::search_comments,
        search::suggestions,
        search::popular,

        // === History Routes ===
        history::recent,
        history::clear,

        // === Health Routes ===
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(
        schemas(
            // === Error Types ===
            ApiError, ErrorCode,

            // === Search Types ===
            SearchRequest, SearchFilters, SearchResponse, SearchResult,
            SearchSuggestion, SearchHistoryEntry,

            // === Domain Enums ===
            ContentKind, SearchScope, SortOrder, Difficulty,

            // === Route Response Types ===
            ClearHistoryResponse,
            health::HealthResponse, health::HealthStatus,
            health::HealthDetails, health::ComponentHealth,
        )
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate OpenAPI spec as JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        let openapi = Self::openapi();
        serde_json::to_string_pretty(&openapi)
    }
}
