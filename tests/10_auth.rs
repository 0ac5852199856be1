mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn rejects_requests_without_api_key() -> Result<()> {
    let app = common::test_app();

    let res = common::request(&app, "GET", "/users", None, None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "API Key required");
    Ok(())
}

#[tokio::test]
async fn rejects_requests_with_invalid_api_key() -> Result<()> {
    let app = common::test_app();

    let res = common::request(&app, "GET", "/users", Some("invalid-key"), None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Invalid API Key");
    Ok(())
}

#[tokio::test]
async fn auth_applies_to_every_users_route() -> Result<()> {
    let app = common::test_app();

    for (method, path) in [
        ("POST", "/users"),
        ("GET", "/users"),
        ("GET", "/users/stats"),
        ("GET", "/users/9aa9e9b4-0000-0000-0000-000000000000"),
        ("PUT", "/users/9aa9e9b4-0000-0000-0000-000000000000"),
        ("DELETE", "/users/9aa9e9b4-0000-0000-0000-000000000000"),
    ] {
        let res = common::request(&app, method, path, None, None).await?;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{method} {path}");
    }
    Ok(())
}

#[tokio::test]
async fn root_and_health_are_public() -> Result<()> {
    let app = common::test_app();

    let res = common::request(&app, "GET", "/", None, None).await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = common::request(&app, "GET", "/health", None, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    Ok(())
}
