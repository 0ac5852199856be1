use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::User;

const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        seq BIGSERIAL PRIMARY KEY,
        id UUID NOT NULL UNIQUE,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL
    )
"#;

/// Postgres-backed user store.
///
/// Email uniqueness rides on the UNIQUE constraint, so a race between two
/// concurrent creates with the same email resolves in the database: one
/// row lands, the other insert fails with a unique violation. Creation
/// order is the `seq` sequence, which keeps pagination stable even when
/// two rows share a timestamp.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::query(SCHEMA_SQL).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

// LIMIT/OFFSET bind as i64; clamp so huge u64 values cannot flip negative
fn to_sql_bound(value: u64) -> i64 {
    value.min(i64::MAX as u64) as i64
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, name: String, email: String) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO users (id, name, email, created_at) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateEmail
                } else {
                    StoreError::from(e)
                }
            })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users ORDER BY seq LIMIT $1 OFFSET $2",
        )
        .bind(to_sql_bound(limit))
        .bind(to_sql_bound(offset))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn update(&self, id: Uuid, name: String, email: String) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET name = $1, email = $2 WHERE id = $3 \
             RETURNING id, name, email, created_at",
        )
        .bind(&name)
        .bind(&email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateEmail
            } else {
                StoreError::from(e)
            }
        })?;

        user.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn count_by_domain(&self) -> Result<HashMap<String, u64>, StoreError> {
        let rows = sqlx::query(
            "SELECT split_part(email, '@', 2) AS domain, COUNT(*) AS count \
             FROM users GROUP BY 1",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts = HashMap::new();
        for row in rows {
            let domain: String = row.try_get("domain")?;
            let count: i64 = row.try_get("count")?;
            counts.insert(domain, count as u64);
        }
        Ok(counts)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
