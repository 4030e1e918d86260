//! HTTP wiring: routes and middleware. No ingestion logic lives here.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{app_state::AppState, health, ingest, openapi};

/// `/ingest` accepts every method so wrong-method calls get the handler's
/// own 405 outcome rather than the router's.
pub fn router(state: AppState) -> Router {
    let body_limit = state.ingest.limits().max_body_bytes;

    Router::new()
        .route("/ingest", any(ingest::handlers::ingest))
        .route("/healthz", get(health::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_route() {
        let app = router(AppState::new(&Config::default()));

        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "OK");
    }

    #[tokio::test]
    async fn test_request_id_header_set() {
        let app = router(AppState::new(&Config::default()));

        let request = Request::builder()
            .method("GET")
            .uri("/ingest")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_openapi_route() {
        let app = router(AppState::new(&Config::default()));

        let request = Request::builder()
            .uri("/openapi.json")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
