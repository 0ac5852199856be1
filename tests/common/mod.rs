#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use user_directory_api::middleware::RateLimiter;
use user_directory_api::store::MemoryUserStore;
use user_directory_api::{app, AppState};

pub const API_KEY: &str = "test-secret";

/// App over a fresh in-memory store with a limiter generous enough to
/// stay out of the way of CRUD tests
pub fn test_app() -> Router {
    app_with_limiter(RateLimiter::new(Duration::from_secs(900), 10_000))
}

pub fn app_with_limiter(limiter: RateLimiter) -> Router {
    let state = AppState {
        store: Arc::new(MemoryUserStore::new()),
        limiter: Arc::new(limiter),
        api_key: API_KEY.into(),
    };
    app(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Drive one request through the router in-process
pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    api_key: Option<&str>,
    body: Option<Value>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .context("router rejected request")?;

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("response body was not JSON")?
    };

    Ok(TestResponse { status, body })
}

/// Like `request`, but ships the body verbatim for malformed-input cases
pub async fn request_raw(
    app: &Router,
    method: &str,
    path: &str,
    api_key: Option<&str>,
    body: &str,
) -> Result<TestResponse> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string()))?)
        .await
        .context("router rejected request")?;

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("response body was not JSON")?
    };

    Ok(TestResponse { status, body })
}

pub async fn create_user(app: &Router, name: &str, email: &str) -> Result<TestResponse> {
    request(
        app,
        "POST",
        "/users",
        Some(API_KEY),
        Some(serde_json::json!({ "name": name, "email": email })),
    )
    .await
}
