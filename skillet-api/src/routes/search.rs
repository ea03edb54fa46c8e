//! Search REST API Routes
//!
//! This module implements Axum route handlers for cross-entity search:
//! the aggregated endpoint, the kind-scoped conveniences, and the
//! suggestion and popular-query lookups.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use skillet_core::{EntityId, SearchRequest, SearchResponse, SearchScope, SearchSuggestion};
use skillet_search::SearchService;

use crate::error::{ApiError, ApiResult};
use crate::extractors::Caller;

// ============================================================================
// STATE
// ============================================================================

#[derive(Clone)]
pub struct SearchState {
    pub service: Arc<SearchService>,
}

impl SearchState {
    pub fn new(service: Arc<SearchService>) -> Self {
        Self { service }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// Shared body of the search handlers. Blank queries are rejected at the
/// edge before the service is involved; identified callers get their
/// search recorded.
async fn run_search(
    state: &SearchState,
    caller: Option<EntityId>,
    req: &SearchRequest,
) -> ApiResult<Json<SearchResponse>> {
    if req.query.trim().is_empty() {
        return Err(ApiError::missing_field("query"));
    }

    let response = match caller {
        Some(user) => state.service.search_as_user(user, req).await?,
        None => state.service.search(req).await?,
    };
    Ok(Json(response))
}

/// POST /api/v1/search - Search across every content kind
#[utoipa::path(
    post,
    path = "/api/v1/search",
    tag = "Search",
    request_body = SearchRequest,
    params(
        ("x-user-id" = Option<String>, Header, description = "Caller identity; the search is recorded in history when present"),
    ),
    responses(
        (status = 200, description = "Aggregated search results", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn search(
    State(state): State<SearchState>,
    Caller(caller): Caller,
    Json(req): Json<SearchRequest>,
) -> ApiResult<impl IntoResponse> {
    run_search(&state, caller, &req).await
}

/// POST /api/v1/search/posts - Search feed posts only
#[utoipa::path(
    post,
    path = "/api/v1/search/posts",
    tag = "Search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Post results", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn search_posts(
    State(state): State<SearchState>,
    Caller(caller): Caller,
    Json(mut req): Json<SearchRequest>,
) -> ApiResult<impl IntoResponse> {
    req.scope = SearchScope::Posts;
    run_search(&state, caller, &req).await
}

/// POST /api/v1/search/recipes - Search recipes only
#[utoipa::path(
    post,
    path = "/api/v1/search/recipes",
    tag = "Search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Recipe results", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn search_recipes(
    State(state): State<SearchState>,
    Caller(caller): Caller,
    Json(mut req): Json<SearchRequest>,
) -> ApiResult<impl IntoResponse> {
    req.scope = SearchScope::Recipes;
    run_search(&state, caller, &req).await
}

/// POST /api/v1/search/users - Search user profiles only
#[utoipa::path(
    post,
    path = "/api/v1/search/users",
    tag = "Search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "User results", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn search_users(
    State(state): State<SearchState>,
    Caller(caller): Caller,
    Json(mut req): Json<SearchRequest>,
) -> ApiResult<impl IntoResponse> {
    req.scope = SearchScope::Users;
    run_search(&state, caller, &req).await
}

/// POST /api/v1/search/articles - Search articles only
#[utoipa::path(
    post,
    path = "/api/v1/search/articles",
    tag = "Search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Article results", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn search_articles(
    State(state): State<SearchState>,
    Caller(caller): Caller,
    Json(mut req): Json<SearchRequest>,
) -> ApiResult<impl IntoResponse> {
    req.scope = SearchScope::Articles;
    run_search(&state, caller, &req).await
}

/// POST /api/v1/search/comments - Search comments only
#[utoipa::path(
    post,
    path = "/api/v1/search/comments",
    tag = "Search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Comment results", body = SearchResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn search_comments(
    State(state): State<SearchState>,
    Caller(caller): Caller,
    Json(mut req): Json<SearchRequest>,
) -> ApiResult<impl IntoResponse> {
    req.scope = SearchScope::Comments;
    run_search(&state, caller, &req).await
}

// ============================================================================
// LOOKUP HANDLERS
// ============================================================================

/// Query parameters for the suggestion lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsQuery {
    /// Partial query text. Blank yields no suggestions.
    #[serde(default)]
    pub query: String,
    /// Content kinds to draw titles from.
    #[serde(default)]
    pub scope: SearchScope,
}

/// GET /api/v1/search/suggestions - Title suggestions for a partial query
#[utoipa::path(
    get,
    path = "/api/v1/search/suggestions",
    tag = "Search",
    params(
        ("query" = Option<String>, Query, description = "Partial query text"),
        ("scope" = Option<SearchScope>, Query, description = "Content kinds to draw from (default: all)"),
    ),
    responses(
        (status = 200, description = "Title suggestions tagged with their source kind", body = Vec<SearchSuggestion>),
    ),
)]
pub async fn suggestions(
    State(state): State<SearchState>,
    Query(params): Query<SuggestionsQuery>,
) -> Json<Vec<SearchSuggestion>> {
    Json(state.service.suggestions(&params.query, params.scope).await)
}

/// GET /api/v1/search/popular - Most frequent recorded queries
#[utoipa::path(
    get,
    path = "/api/v1/search/popular",
    tag = "Search",
    responses(
        (status = 200, description = "Popular queries, most frequent first", body = Vec<SearchSuggestion>),
        (status = 500, description = "History store unavailable", body = ApiError),
    ),
)]
pub async fn popular(State(state): State<SearchState>) -> ApiResult<impl IntoResponse> {
    let popular = state.service.popular_searches().await?;
    Ok(Json(popular))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the search routes router.
pub fn create_router(service: Arc<SearchService>) -> Router {
    let state = SearchState::new(service);

    Router::new()
        .route("/", post(search))
        .route("/posts", post(search_posts))
        .route("/recipes", post(search_recipes))
        .route("/users", post(search_users))
        .route("/articles", post(search_articles))
        .route("/comments", post(search_comments))
        .route("/suggestions", get(suggestions))
        .route("/popular", get(popular))
        .with_state(state)
}
