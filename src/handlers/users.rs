use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::{UserService, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::validation::validate_user_payload;
use crate::models::UserPayload;
use crate::AppState;

/// Pagination query parameters, kept as raw strings so that non-numeric
/// values fall back to the defaults instead of failing extraction
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    fn page(&self) -> u64 {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    fn limit(&self) -> u64 {
        parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.parse::<u64>().ok()).filter(|v| *v >= 1)
}

/// A malformed id cannot name any user, so it reads as not-found rather
/// than bad-request
fn parse_user_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found("User not found"))
}

/// POST /users - create a user
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let valid = validate_user_payload(&payload).map_err(ApiError::validation_failed)?;
    let user = UserService::new(state.store).create(valid).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

/// GET /users?page&limit - list users in creation order
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = UserService::new(state.store)
        .list(query.page(), query.limit())
        .await?;
    Ok(Json(page))
}

/// GET /users/stats - aggregate user statistics
pub async fn user_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = UserService::new(state.store).stats().await?;
    Ok(Json(stats))
}

/// GET /users/:id - fetch a single user
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_user_id(&id)?;
    let user = UserService::new(state.store).get_by_id(id).await?;
    Ok(Json(user))
}

/// PUT /users/:id - replace name/email
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_user_id(&id)?;
    let Json(payload) = payload?;
    let valid = validate_user_payload(&payload).map_err(ApiError::validation_failed)?;
    let user = UserService::new(state.store).update(id, valid).await?;
    Ok(Json(user))
}

/// DELETE /users/:id - remove a user permanently
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_user_id(&id)?;
    UserService::new(state.store).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
