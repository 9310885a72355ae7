//! Shared helpers for HTTP-level integration tests.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`;
//! no TCP listener is started.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use slidecraft_api::config::{GenerationConfig, ServerConfig};
use slidecraft_api::router::build_app_router;
use slidecraft_api::state::AppState;
use slidecraft_generation::{ContentGenerator, StaticGenerator};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        default_slide_count: 5,
        max_slide_count: 10,
        generation: GenerationConfig {
            api_url: "http://127.0.0.1:9/v1".to_string(),
            api_key: String::new(),
            model: "test-model".to_string(),
            timeout_secs: 1,
        },
    }
}

/// Build the full application router backed by a canned generator.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, StaticGenerator::new())
}

/// Build the application with a specific generator.
pub fn build_test_app_with(pool: PgPool, generator: impl ContentGenerator + 'static) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator: Arc::new(generator),
    };
    build_app_router(state, &config)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

/// POST with no body and no content type.
pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Create a presentation through the API and return its `data` payload.
pub async fn create_presentation(pool: &PgPool, slide_count: u32) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/presentations",
        serde_json::json!({
            "title": "Solar Power",
            "prompt": "Why rooftop panels pay off",
            "slide_count": slide_count,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Titles of a presentation's slides, in order.
pub async fn slide_titles(pool: &PgPool, presentation_id: i64) -> Vec<String> {
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/presentations/{presentation_id}/slides"),
    )
    .await;
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

/// Orders of a presentation's slides, in list order.
pub async fn slide_orders(pool: &PgPool, presentation_id: i64) -> Vec<i64> {
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/presentations/{presentation_id}/slides"),
    )
    .await;
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["order"].as_i64().unwrap())
        .collect()
}
