//! In-memory credential store.

use super::{CredentialStore, StoreError};
use crate::auth::User;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Vec-backed store keeping users in insertion order.
///
/// By default it accepts duplicate emails, leaving uniqueness to the caller.
/// [`MemoryStore::with_unique_emails`] makes it reject them like a database
/// `UNIQUE` constraint would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    unique_emails: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unique_emails() -> Self {
        Self {
            users: RwLock::default(),
            unique_emails: true,
        }
    }

    /// Snapshot of every stored user.
    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;

        Ok(users.iter().filter(|u| u.email == email).cloned().collect())
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if self.unique_emails && users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict);
        }

        let user = User::new(Uuid::new_v4(), email, password_hash);
        users.push(user.clone());

        debug!(user_id = %user.id, "stored user");

        Ok(user)
    }
}
