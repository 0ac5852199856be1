pub mod memory;
pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::User;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already in use")]
    DuplicateEmail,
    #[error("record not found")]
    NotFound,
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Persistence contract for user records.
///
/// Listing order is creation order (oldest first) and is stable across
/// calls so pagination is deterministic. Email uniqueness is enforced
/// atomically by the implementation: of two concurrent creates with the
/// same email, exactly one succeeds and the other gets `DuplicateEmail`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, name: String, email: String) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Creation-ordered slice of at most `limit` users, skipping `offset`
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// Full name/email replacement; `DuplicateEmail` when the new email
    /// belongs to a different user
    async fn update(&self, id: Uuid, name: String, email: String) -> Result<User, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError>;

    /// User counts grouped by email domain (the substring after '@')
    async fn count_by_domain(&self) -> Result<HashMap<String, u64>, StoreError>;

    /// Backend liveness probe for the health endpoint
    async fn health_check(&self) -> Result<(), StoreError>;
}
