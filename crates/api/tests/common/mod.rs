#![allow(dead_code)]

use std::sync::Arc;

use aquacheck_api::config::ServerConfig;
use aquacheck_api::router::build_app_router;
use aquacheck_api::state::AppState;
use aquacheck_core::compliance::{ComplianceEngine, MARGIN_RATIO};
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the built-in threshold table.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        margin_ratio: MARGIN_RATIO,
        threshold_table_path: None,
    }
}

/// Build the full application router with the production middleware stack
/// and the default engine.
pub fn build_test_app() -> Router {
    build_test_app_with_engine(ComplianceEngine::default())
}

/// Same as [`build_test_app`] with a caller-supplied engine.
pub fn build_test_app_with_engine(engine: ComplianceEngine) -> Router {
    let config = test_config();
    let state = AppState {
        engine: Arc::new(engine),
    };
    build_app_router(state, &config).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_json_str(app, uri, &body.to_string()).await
}

/// POST a pre-serialized JSON body, for tests that depend on key order.
pub async fn post_json_str(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_text(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
