use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::AppState;

/// API key authentication middleware.
///
/// Compares the x-api-key header verbatim against the configured secret.
/// The missing and mismatched cases produce distinct messages; clients
/// key off the literal text.
pub async fn api_key_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("API Key required"))?;

    if api_key != state.api_key.as_ref() {
        return Err(ApiError::unauthorized("Invalid API Key"));
    }

    Ok(next.run(request).await)
}
