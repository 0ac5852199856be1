mod common;

use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use common::API_KEY;
use user_directory_api::middleware::RateLimiter;

/// Request with an explicit x-forwarded-for identity
async fn get_users_as(app: &Router, identity: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("GET")
        .uri("/users")
        .header("x-api-key", API_KEY)
        .header("x-forwarded-for", identity)
        .body(Body::empty())?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

#[tokio::test]
async fn excess_requests_from_one_identity_are_rejected() -> Result<()> {
    let app = common::app_with_limiter(RateLimiter::new(Duration::from_secs(60), 3));

    for _ in 0..3 {
        let (status, _) = get_users_as(&app, "9.9.9.9").await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get_users_as(&app, "9.9.9.9").await?;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn other_identities_are_unaffected() -> Result<()> {
    let app = common::app_with_limiter(RateLimiter::new(Duration::from_secs(60), 2));

    for _ in 0..2 {
        get_users_as(&app, "9.9.9.9").await?;
    }
    let (status, _) = get_users_as(&app, "9.9.9.9").await?;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, _) = get_users_as(&app, "8.8.8.8").await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn rate_limiting_runs_after_authentication() -> Result<()> {
    let app = common::app_with_limiter(RateLimiter::new(Duration::from_secs(60), 1));

    // Unauthenticated requests are turned away before reaching the
    // limiter, so they never consume quota
    for _ in 0..5 {
        let request = Request::builder()
            .method("GET")
            .uri("/users")
            .header("x-forwarded-for", "7.7.7.7")
            .body(Body::empty())?;
        let response = app.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let (status, _) = get_users_as(&app, "7.7.7.7").await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
