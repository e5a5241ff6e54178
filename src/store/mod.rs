//! Credential persistence.
//!
//! The auth service only needs two capabilities: find users by email and insert
//! a new user. Both stores here return lookups in insertion order.

pub mod memory;
pub mod postgres;

pub use self::memory::MemoryStore;
pub use self::postgres::PgStore;

use crate::auth::User;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the insert because the email already exists.
    #[error("email already stored")]
    Conflict,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Lookup-by-email and insert over user records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Users with exactly this email, oldest first. Empty when none exist.
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError>;

    /// Persist a new user and return it with its assigned id.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;
}

#[async_trait]
impl<S: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<S> {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError> {
        (**self).find_by_email(email).await
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        (**self).insert(email, password_hash).await
    }
}
