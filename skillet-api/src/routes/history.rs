//! Search History REST API Routes
//!
//! Per-user history listing and clearing. Both endpoints require the
//! caller to identify themselves with the `x-user-id` header.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use skillet_core::SearchHistoryEntry;
use skillet_search::SearchService;

use crate::error::{ApiError, ApiResult};
use crate::extractors::RequireCaller;

// ============================================================================
// TYPES
// ============================================================================

/// Response body for history clearing.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ClearHistoryResponse {
    /// Whether any entries were removed
    pub cleared: bool,
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Clone)]
pub struct HistoryState {
    pub service: Arc<SearchService>,
}

impl HistoryState {
    pub fn new(service: Arc<SearchService>) -> Self {
        Self { service }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/search/history - The caller's recent searches
#[utoipa::path(
    get,
    path = "/api/v1/search/history",
    tag = "History",
    params(
        ("x-user-id" = String, Header, description = "Caller identity"),
    ),
    responses(
        (status = 200, description = "Recent searches, newest first", body = Vec<SearchHistoryEntry>),
        (status = 401, description = "Caller identity missing", body = ApiError),
        (status = 500, description = "History store unavailable", body = ApiError),
    ),
)]
pub async fn recent(
    State(state): State<HistoryState>,
    RequireCaller(caller): RequireCaller,
) -> ApiResult<impl IntoResponse> {
    let entries = state.service.history(caller).await?;
    Ok(Json(entries))
}

/// DELETE /api/v1/search/history - Forget the caller's recorded searches
#[utoipa::path(
    delete,
    path = "/api/v1/search/history",
    tag = "History",
    params(
        ("x-user-id" = String, Header, description = "Caller identity"),
    ),
    responses(
        (status = 200, description = "Whether any entries were removed", body = ClearHistoryResponse),
        (status = 401, description = "Caller identity missing", body = ApiError),
        (status = 500, description = "History store unavailable", body = ApiError),
    ),
)]
pub async fn clear(
    State(state): State<HistoryState>,
    RequireCaller(caller): RequireCaller,
) -> ApiResult<impl IntoResponse> {
    let cleared = state.service.clear_history(caller).await?;
    Ok(Json(ClearHistoryResponse { cleared }))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the history routes router.
pub fn create_router(service: Arc<SearchService>) -> Router {
    let state = HistoryState::new(service);

    Router::new()
        .route("/", get(recent).delete(clear))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_history_response_serialization() {
        let json = serde_json::to_string(&ClearHistoryResponse { cleared: true }).unwrap();
        assert_eq!(json, r#"{"cleared":true}"#);

        let parsed: ClearHistoryResponse = serde_json::from_str(r#"{"cleared":false}"#).unwrap();
        assert!(!parsed.cleared);
    }
}
