//! End-to-end smoke tests for the Skillet API
//!
//! Each test drives the full Axum router in-process through tower's
//! `oneshot`, backed by the seeded in-memory catalog.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use skillet_api::{create_api_router, ApiConfig, USER_ID_HEADER};
use skillet_search::{SearchBackends, SearchConfig, SearchService};
use skillet_test_utils::doubles::FailingHistoryStore;
use skillet_test_utils::fixtures::seeded_catalog;
use skillet_test_utils::InMemoryHistoryStore;
use tower::ServiceExt; // for `oneshot`

const ANA: &str = "6b2d1f5e-3c4a-4f2e-9d8b-1a2b3c4d5e6f";
const BEN: &str = "0f9e8d7c-6b5a-4f3e-8d2c-1b0a9f8e7d6c";

// ============================================================================
// TEST HELPERS
// ============================================================================

fn seeded_app() -> Router {
    let backends = SearchBackends::in_memory(seeded_catalog(), InMemoryHistoryStore::new());
    let service = Arc::new(SearchService::new(backends, SearchConfig::default()));
    create_api_router(service, &ApiConfig::default())
}

/// App whose history store rejects every call, for degradation tests.
fn failing_history_app() -> Router {
    let catalog = Arc::new(seeded_catalog());
    let backends = SearchBackends {
        posts: catalog.clone(),
        recipes: catalog.clone(),
        users: catalog.clone(),
        articles: catalog.clone(),
        comments: catalog,
        history: Arc::new(FailingHistoryStore),
    };
    let service = Arc::new(SearchService::new(backends, SearchConfig::default()));
    create_api_router(service, &ApiConfig::default())
}

/// Let detached history writes run to completion on the test runtime.
async fn settle() {
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
}

async fn read_json(response: axum::response::Response) -> Result<Value, String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| format!("Failed to read body: {:?}", e))?;
    serde_json::from_slice(&bytes).map_err(|e| format!("Body is not JSON: {}", e))
}

async fn post_json(
    app: &Router,
    uri: &str,
    body: Value,
    user: Option<&str>,
) -> Result<(StatusCode, Value), String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .map_err(|e| e.to_string())?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {:?}", e))?;
    let status = response.status();
    Ok((status, read_json(response).await?))
}

async fn get_json(
    app: &Router,
    uri: &str,
    user: Option<&str>,
) -> Result<(StatusCode, Value), String> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    let request = builder.body(Body::empty()).map_err(|e| e.to_string())?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {:?}", e))?;
    let status = response.status();
    Ok((status, read_json(response).await?))
}

async fn delete_json(
    app: &Router,
    uri: &str,
    user: Option<&str>,
) -> Result<(StatusCode, Value), String> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    let request = builder.body(Body::empty()).map_err(|e| e.to_string())?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {:?}", e))?;
    let status = response.status();
    Ok((status, read_json(response).await?))
}

// ============================================================================
// SEARCH
// ============================================================================

#[tokio::test]
async fn smoke_test_search_aggregates_every_kind() -> Result<(), String> {
    let app = seeded_app();

    let (status, body) = post_json(&app, "/api/v1/search", json!({"query": "quinoa"}), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 6);
    assert_eq!(body["has_more"], false);

    let results = body["results"].as_array().ok_or("results missing")?;
    assert_eq!(results.len(), 6);

    // The seeded corpus has quinoa hits in all five kinds.
    let mut kinds: Vec<&str> = results.iter().filter_map(|r| r["kind"].as_str()).collect();
    kinds.sort_unstable();
    kinds.dedup();
    assert_eq!(kinds, ["article", "comment", "post", "recipe", "user"]);

    // Top hit matches the ranking pinned down in the search crate tests.
    assert_eq!(results[0]["title"], "This quinoa salad saved my meal prep");

    // Facets come from post categories and recipe cuisines.
    assert_eq!(body["filters"], json!(["Lunch", "Mediterranean"]));

    println!("✅ Aggregated search over the seeded catalog passed");
    Ok(())
}

#[tokio::test]
async fn smoke_test_blank_query_is_rejected() -> Result<(), String> {
    let app = seeded_app();

    let (status, body) = post_json(&app, "/api/v1/search", json!({"query": "   "}), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FIELD");
    Ok(())
}

#[tokio::test]
async fn smoke_test_scoped_route_overrides_the_body_scope() -> Result<(), String> {
    let app = seeded_app();

    // The body asks for posts; the /recipes route must win.
    let (status, body) = post_json(
        &app,
        "/api/v1/search/recipes",
        json!({"query": "quinoa", "scope": "posts"}),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 2);
    for result in body["results"].as_array().ok_or("results missing")? {
        assert_eq!(result["kind"], "recipe");
    }
    Ok(())
}

#[tokio::test]
async fn smoke_test_suggestions_endpoint() -> Result<(), String> {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/v1/search/suggestions?query=quinoa", None).await?;
    assert_eq!(status, StatusCode::OK);
    let suggestions = body.as_array().ok_or("expected a JSON array")?;
    let texts: Vec<&str> = suggestions.iter().filter_map(|s| s["text"].as_str()).collect();
    assert_eq!(texts, ["Quinoa salad bowl", "Quinoa salad", "Quinoa salad jars"]);

    // Scoping narrows the source kinds.
    let (status, body) = get_json(
        &app,
        "/api/v1/search/suggestions?query=quinoa&scope=recipes",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let suggestions = body.as_array().ok_or("expected a JSON array")?;
    assert_eq!(suggestions.len(), 2);
    for suggestion in suggestions {
        assert_eq!(suggestion["kind"], "recipe");
    }
    Ok(())
}

#[tokio::test]
async fn smoke_test_popular_reflects_recorded_searches() -> Result<(), String> {
    let app = seeded_app();

    post_json(&app, "/api/v1/search", json!({"query": "quinoa"}), Some(ANA)).await?;
    post_json(&app, "/api/v1/search", json!({"query": "quinoa"}), Some(BEN)).await?;
    post_json(&app, "/api/v1/search", json!({"query": "ramen"}), Some(ANA)).await?;
    settle().await;

    let (status, body) = get_json(&app, "/api/v1/search/popular", None).await?;
    assert_eq!(status, StatusCode::OK);
    let popular = body.as_array().ok_or("expected a JSON array")?;
    assert_eq!(popular.len(), 2);
    assert_eq!(popular[0]["text"], "quinoa");
    assert_eq!(popular[0]["count"], 2);
    assert_eq!(popular[1]["text"], "ramen");
    Ok(())
}

// ============================================================================
// HISTORY
// ============================================================================

#[tokio::test]
async fn smoke_test_history_requires_identity() -> Result<(), String> {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/api/v1/search/history", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, body) = get_json(&app, "/api/v1/search/history", Some("not-a-uuid")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FORMAT");
    Ok(())
}

#[tokio::test]
async fn smoke_test_history_round_trip() -> Result<(), String> {
    let app = seeded_app();

    // An identified search lands in the caller's history.
    post_json(
        &app,
        "/api/v1/search",
        json!({"query": "quinoa salad"}),
        Some(ANA),
    )
    .await?;
    settle().await;

    let (status, body) = get_json(&app, "/api/v1/search/history", Some(ANA)).await?;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().ok_or("expected a JSON array")?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["query"], "quinoa salad");
    assert_eq!(entries[0]["result_count"], 4);

    // Anonymous searches leave no trace.
    post_json(&app, "/api/v1/search", json!({"query": "ramen"}), None).await?;
    settle().await;
    let (_, body) = get_json(&app, "/api/v1/search/history", Some(ANA)).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    // Clearing reports whether anything was removed.
    let (status, body) = delete_json(&app, "/api/v1/search/history", Some(ANA)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], true);

    let (_, body) = get_json(&app, "/api/v1/search/history", Some(ANA)).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(0));

    let (status, body) = delete_json(&app, "/api/v1/search/history", Some(ANA)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], false);

    println!("✅ History round trip passed");
    Ok(())
}

// ============================================================================
// HEALTH AND DOCS
// ============================================================================

#[tokio::test]
async fn smoke_test_health_endpoints() -> Result<(), String> {
    let app = seeded_app();

    let request = Request::builder()
        .uri("/health/ping")
        .body(Body::empty())
        .map_err(|e| e.to_string())?;
    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {:?}", e))?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| format!("Failed to read body: {:?}", e))?;
    assert_eq!(&bytes[..], b"pong");

    let (status, body) = get_json(&app, "/health/live", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&app, "/health/ready", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["details"]["history_store"]["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn smoke_test_readiness_fails_when_history_store_is_down() -> Result<(), String> {
    let app = failing_history_app();

    let (status, body) = get_json(&app, "/health/ready", None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(
        body["details"]["history_store"]["error"],
        "History store ping failed"
    );

    // Content search keeps working while history is down.
    let (status, body) = post_json(&app, "/api/v1/search", json!({"query": "quinoa"}), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 6);
    Ok(())
}

#[tokio::test]
async fn smoke_test_openapi_document_is_served() -> Result<(), String> {
    let app = seeded_app();

    let (status, body) = get_json(&app, "/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Skillet Search API");
    assert!(body["paths"].get("/api/v1/search").is_some());
    assert!(body["paths"].get("/api/v1/search/history").is_some());
    Ok(())
}
