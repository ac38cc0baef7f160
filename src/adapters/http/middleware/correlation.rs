//! Correlation stamping middleware.
//!
//! Reads the inbound `X-Correlation-ID` header, generating a fresh token
//! when missing or blank, binds it to the request task and a tracing span
//! before any downstream work runs, and writes it onto the response
//! unconditionally, error responses included. The task binding is released
//! when the request future completes, whatever the exit path.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use http::HeaderValue;
use tracing::Instrument;

use crate::domain::{correlation, CorrelationId};

/// Correlation header name, shared across all platform services.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Stamps every request and response with a correlation id.
pub async fn correlation_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = CorrelationId::from_header(
        request
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
    )
    .unwrap_or_else(CorrelationId::generate);

    request.extensions_mut().insert(correlation_id.clone());

    let span = tracing::info_span!(
        "request",
        correlation_id = %correlation_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response =
        correlation::scope(correlation_id.clone(), next.run(request).instrument(span)).await;

    // The header value originates from a header or a UUID, so it is always
    // representable; skip silently if a proxy handed us something that isn't.
    if let Ok(value) = HeaderValue::from_str(correlation_id.as_str()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        middleware::from_fn,
        routing::get,
        Router,
    };
    use http::{Request as HttpRequest, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/boom",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/ctx",
                get(|| async {
                    correlation::current()
                        .map(|id| id.as_str().to_string())
                        .unwrap_or_default()
                }),
            )
            .layer(from_fn(correlation_middleware))
    }

    #[tokio::test]
    async fn inbound_id_is_reused_on_the_response() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/ok")
                    .header("x-correlation-id", "inbound-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(CORRELATION_ID_HEADER).unwrap(),
            "inbound-42"
        );
    }

    #[tokio::test]
    async fn missing_id_is_generated() {
        let response = app()
            .oneshot(HttpRequest::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers().get(CORRELATION_ID_HEADER).unwrap();
        assert!(!header.to_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_inbound_id_is_replaced() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/ok")
                    .header("x-correlation-id", "   ")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let header = response.headers().get(CORRELATION_ID_HEADER).unwrap();
        assert_ne!(header.to_str().unwrap().trim(), "");
    }

    #[tokio::test]
    async fn error_responses_still_carry_the_id() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/boom")
                    .header("x-correlation-id", "err-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(CORRELATION_ID_HEADER).unwrap(),
            "err-7"
        );
    }

    #[tokio::test]
    async fn handlers_can_read_the_bound_id() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/ctx")
                    .header("x-correlation-id", "ctx-9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ctx-9");
    }
}
