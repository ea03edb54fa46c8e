//! Caller identity extractors.
//!
//! Search traffic is not authenticated; callers identify themselves with
//! the optional `x-user-id` header so their searches can be recorded.
//! History routes require the header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use skillet_core::EntityId;

use crate::error::ApiError;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Optional caller identity from the `x-user-id` header.
///
/// Yields `None` when the header is absent. A present but malformed
/// header is rejected with 400 rather than treated as anonymous.
///
/// # Example
///
/// ```rust,ignore
/// async fn search(
///     Caller(caller): Caller,
///     Json(req): Json<SearchRequest>,
/// ) -> ApiResult<impl IntoResponse> {
///     // caller is Option<EntityId>
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Option<EntityId>);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = match parts.headers.get(USER_ID_HEADER) {
            None => return Ok(Caller(None)),
            Some(value) => value,
        };

        let raw = value
            .to_str()
            .map_err(|_| ApiError::invalid_format(USER_ID_HEADER, "a UUID"))?;
        let id = raw
            .parse::<EntityId>()
            .map_err(|_| ApiError::invalid_format(USER_ID_HEADER, "a UUID"))?;

        Ok(Caller(Some(id)))
    }
}

/// Required caller identity from the `x-user-id` header.
///
/// Rejects with 401 when the header is absent, 400 when it is malformed.
#[derive(Debug, Clone, Copy)]
pub struct RequireCaller(pub EntityId);

#[async_trait]
impl<S> FromRequestParts<S> for RequireCaller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Caller(caller) = Caller::from_request_parts(parts, state).await?;
        caller
            .map(RequireCaller)
            .ok_or_else(|| ApiError::unauthorized(format!("Missing {} header", USER_ID_HEADER)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use skillet_core::new_entity_id;
    use tower::ServiceExt; // for `oneshot`

    fn test_app() -> Router {
        async fn whoami(Caller(caller): Caller) -> String {
            match caller {
                Some(id) => id.to_string(),
                None => "anonymous".to_string(),
            }
        }

        async fn mine(RequireCaller(caller): RequireCaller) -> String {
            caller.to_string()
        }

        Router::new()
            .route("/whoami", get(whoami))
            .route("/mine", get(mine))
    }

    async fn body_string(response: axum::response::Response) -> Result<String, String> {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| format!("Failed to read body: {:?}", e))?;
        String::from_utf8(body.to_vec()).map_err(|e| format!("Invalid UTF-8 body: {}", e))
    }

    #[tokio::test]
    async fn test_caller_without_header_is_anonymous() -> Result<(), String> {
        let app = test_app();

        let request = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await?, "anonymous");
        Ok(())
    }

    #[tokio::test]
    async fn test_caller_with_valid_header() -> Result<(), String> {
        let app = test_app();
        let user = new_entity_id();

        let request = Request::builder()
            .uri("/whoami")
            .header(USER_ID_HEADER, user.to_string())
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await?, user.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_header_is_rejected() -> Result<(), String> {
        let app = test_app();

        let request = Request::builder()
            .uri("/whoami")
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await?;
        assert!(body.contains("INVALID_FORMAT"));
        assert!(body.contains(USER_ID_HEADER));
        Ok(())
    }

    #[tokio::test]
    async fn test_require_caller_without_header_is_unauthorized() -> Result<(), String> {
        let app = test_app();

        let request = Request::builder()
            .uri("/mine")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_string(response).await?;
        assert!(body.contains("UNAUTHORIZED"));
        Ok(())
    }

    #[tokio::test]
    async fn test_require_caller_with_valid_header() -> Result<(), String> {
        let app = test_app();
        let user = new_entity_id();

        let request = Request::builder()
            .uri("/mine")
            .header(USER_ID_HEADER, user.to_string())
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await?, user.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn test_require_caller_with_malformed_header_is_bad_request() -> Result<(), String> {
        let app = test_app();

        let request = Request::builder()
            .uri("/mine")
            .header(USER_ID_HEADER, "plainly wrong")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }
}
