//! Skillet API - REST Search Layer
//!
//! This crate provides the HTTP surface for the Skillet search service.
//! It exposes REST endpoints (Axum) for aggregated and kind-scoped
//! search, suggestions, popular queries, and per-user search history.
//!
//! The API layer is a thin shell over skillet-search: handlers validate
//! and translate requests, and the service does the ranking work.

pub mod config;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use extractors::{Caller, RequireCaller, USER_ID_HEADER};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
