use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::User;

/// In-memory user store for development without a database and for tests.
///
/// Records are kept in insertion order, which is also creation order.
/// Uniqueness checks and the write they guard happen under one lock, so
/// concurrent creates with the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn email_domain(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, name: String, email: String) -> Result<User, StoreError> {
        let mut users = self.lock();
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>, StoreError> {
        Ok(self
            .lock()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.lock().len() as u64)
    }

    async fn update(&self, id: Uuid, name: String, email: String) -> Result<User, StoreError> {
        let mut users = self.lock();
        // A missing id is not-found regardless of the candidate email,
        // matching the Postgres backend's precedence
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        if users.iter().any(|u| u.email == email && u.id != id) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = &mut users[index];
        user.name = name;
        user.email = email;
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut users = self.lock();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, StoreError> {
        Ok(self.lock().iter().filter(|u| u.created_at >= since).count() as u64)
    }

    async fn count_by_domain(&self) -> Result<HashMap<String, u64>, StoreError> {
        let users = self.lock();
        let mut counts = HashMap::new();
        for user in users.iter() {
            if let Some(domain) = email_domain(&user.email) {
                *counts.entry(domain.to_string()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
