use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::User;
use crate::store::UserStore;
use crate::validation::ValidUser;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    #[serde(rename = "totalUsers")]
    pub total_users: u64,
    #[serde(rename = "lastWeekUsers")]
    pub last_week_users: u64,
    #[serde(rename = "byDomain")]
    pub by_domain: HashMap<String, u64>,
}

/// Orchestrates the user store for the CRUD and stats operations
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: ValidUser) -> Result<User, ApiError> {
        let user = self.store.create(payload.name, payload.email).await?;
        tracing::info!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn list(&self, page: u64, limit: u64) -> Result<UserPage, ApiError> {
        // Saturating: page and limit are caller-controlled and may both
        // be u64::MAX; an out-of-range offset just yields an empty page
        let offset = page.saturating_sub(1).saturating_mul(limit);
        let users = self.store.list(offset, limit).await?;
        let total = self.store.count().await?;
        let total_pages = total.div_ceil(limit);

        Ok(UserPage {
            users,
            page,
            limit,
            total,
            total_pages,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User, ApiError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    pub async fn update(&self, id: Uuid, payload: ValidUser) -> Result<User, ApiError> {
        let user = self.store.update(id, payload.name, payload.email).await?;
        tracing::info!("Updated user {}", user.id);
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.store.delete(id).await?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }

    /// Aggregate counts: total, trailing-7-day creations and per-domain.
    /// The week boundary is computed fresh on every call.
    pub async fn stats(&self) -> Result<UserStats, ApiError> {
        let week_ago = Utc::now() - Duration::days(7);

        let total_users = self.store.count().await?;
        let last_week_users = self.store.count_created_since(week_ago).await?;
        let by_domain = self.store.count_by_domain().await?;

        Ok(UserStats {
            total_users,
            last_week_users,
            by_domain,
        })
    }
}
