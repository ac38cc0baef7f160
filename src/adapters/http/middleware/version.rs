//! API version tagging middleware.
//!
//! Extracts the version segment from `/api/v{N}/...` paths before the inner
//! stack runs and stamps it on the response afterwards, so error responses
//! produced anywhere downstream still carry the header. Unversioned paths
//! simply go untagged; that is not an error at this layer.

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;

use crate::domain::ApiVersion;

/// Response header telling clients which API version answered.
pub const API_VERSION_HEADER: &str = "api-version";

/// Tags responses with the API version from the request path.
pub async fn version_middleware(request: Request, next: Next) -> Response {
    let version = ApiVersion::from_path(request.uri().path());

    let mut response = next.run(request).await;

    if let Some(version) = version {
        if let Ok(value) = HeaderValue::from_str(version.as_str()) {
            response.headers_mut().insert(API_VERSION_HEADER, value);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, middleware::from_fn, routing::get, Router};
    use http::{Request as HttpRequest, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/api/v1/events", get(|| async { "events" }))
            .route("/api/events", get(|| async { "unversioned" }))
            .layer(from_fn(version_middleware))
    }

    #[tokio::test]
    async fn versioned_path_is_tagged() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/v1/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get(API_VERSION_HEADER).unwrap(), "v1");
    }

    #[tokio::test]
    async fn unversioned_path_gets_no_header_and_no_error() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(API_VERSION_HEADER).is_none());
    }

    #[tokio::test]
    async fn downstream_404s_still_carry_the_version() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/v2/missing/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get(API_VERSION_HEADER).unwrap(), "v2");
    }
}
