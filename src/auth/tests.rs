//! Auth service tests.

#![allow(clippy::unwrap_used)]

use super::{AuthError, AuthService};
use crate::password::{HashError, Params, PasswordHasher, DELIMITER};
use crate::store::{CredentialStore, MemoryStore, StoreError};
use crate::User;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(Params::new(1024, 1, 1, None).expect("valid argon2 params"))
}

fn service() -> AuthService<Arc<MemoryStore>> {
    AuthService::with_hasher(Arc::new(MemoryStore::new()), fast_hasher())
}

/// Store whose lookups never see existing rows but whose inserts hit a unique
/// constraint, as when another request inserts between check and insert.
#[derive(Default)]
struct RacingStore {
    inserts: AtomicUsize,
}

#[async_trait]
impl CredentialStore for RacingStore {
    async fn find_by_email(&self, _email: &str) -> Result<Vec<User>, StoreError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _email: &str, _password_hash: &str) -> Result<User, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Conflict)
    }
}

struct BrokenStore;

#[async_trait]
impl CredentialStore for BrokenStore {
    async fn find_by_email(&self, _email: &str) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
    }

    async fn insert(&self, _email: &str, _password_hash: &str) -> Result<User, StoreError> {
        Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
    }
}

#[tokio::test]
async fn signup_stores_salted_and_hashed_password() {
    let service = service();
    let user = service.signup("sadf@fdas.com", "sadf").await.unwrap();

    assert_ne!(user.password, "sadf");
    let (salt, hash) = user.password.split_once(DELIMITER).unwrap();
    assert!(!salt.is_empty());
    assert!(!hash.is_empty());

    let stored = service.store().users().await;
    assert_eq!(stored, vec![user]);
}

#[tokio::test]
async fn signup_rejects_email_in_use() {
    let service = service();
    let first = service.signup("asdf@asdf.com", "asdf").await.unwrap();

    let err = service
        .signup("asdf@asdf.com", "another")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::DuplicateEmail));
    assert_eq!(err.to_string(), "email in use");
    assert_eq!(service.store().users().await, vec![first]);
}

#[tokio::test]
async fn signup_maps_store_conflict_to_duplicate_email() {
    let store = Arc::new(RacingStore::default());
    let service = AuthService::with_hasher(Arc::clone(&store), fast_hasher());

    let err = service.signup("race@example.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::DuplicateEmail));
    assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_signups_with_unique_store_create_one_user() {
    let store = Arc::new(MemoryStore::with_unique_emails());
    let service = Arc::new(AuthService::with_hasher(Arc::clone(&store), fast_hasher()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.signup("same@example.com", &format!("pw{i}")).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(matches!(err, AuthError::DuplicateEmail)),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn signup_requires_email_and_password() {
    let service = service();

    assert!(matches!(
        service.signup("", "password").await,
        Err(AuthError::MissingCredentials)
    ));
    assert!(matches!(
        service.signup("a@example.com", "").await,
        Err(AuthError::MissingCredentials)
    ));
    assert!(service.store().is_empty().await);
}

#[tokio::test]
async fn signin_with_unknown_email_fails() {
    let service = service();

    let err = service
        .signin("asdfas@asdfa.com", "pasasdfasf")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::UserNotFound));
    assert_eq!(err.to_string(), "user not found");
}

#[tokio::test]
async fn signin_with_wrong_password_fails() {
    let service = service();
    service
        .signup("asdfas@aesdfasd.com", "123421432")
        .await
        .unwrap();

    let err = service
        .signin("asdfas@aesdfasd.com", "password")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidPassword));
    assert_eq!(err.to_string(), "bad password");
}

#[tokio::test]
async fn signin_with_correct_password_returns_user() {
    let service = service();
    let created = service
        .signup("asdfas.sdafas.com", "mypassword")
        .await
        .unwrap();

    let user = service
        .signin("asdfas.sdafas.com", "mypassword")
        .await
        .unwrap();

    assert_eq!(user, created);
}

#[tokio::test]
async fn signin_does_not_mutate_store() {
    let service = service();
    service.signup("a@example.com", "pw").await.unwrap();
    let before = service.store().users().await;

    service.signin("a@example.com", "pw").await.unwrap();
    let _ = service.signin("a@example.com", "nope").await;
    let _ = service.signin("b@example.com", "pw").await;

    assert_eq!(service.store().users().await, before);
}

#[tokio::test]
async fn signin_uses_first_record_when_duplicates_exist() {
    let hasher = fast_hasher();
    let store = Arc::new(MemoryStore::new());
    let first = store
        .insert("dup@example.com", &hasher.hash("first").unwrap())
        .await
        .unwrap();
    store
        .insert("dup@example.com", &hasher.hash("second").unwrap())
        .await
        .unwrap();
    let service = AuthService::with_hasher(store, hasher);

    assert_eq!(service.signin("dup@example.com", "first").await.unwrap(), first);
    assert!(matches!(
        service.signin("dup@example.com", "second").await,
        Err(AuthError::InvalidPassword)
    ));
}

#[tokio::test]
async fn signin_reports_malformed_stored_hash() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert("legacy@example.com", "plaintext")
        .await
        .unwrap();
    let service = AuthService::with_hasher(store, fast_hasher());

    let err = service
        .signin("legacy@example.com", "plaintext")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Hash(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn signin_reports_truncated_stored_hash() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert(
            "truncated@example.com",
            "00112233445566778899aabbccddeeff.abcd",
        )
        .await
        .unwrap();
    let service = AuthService::with_hasher(store, fast_hasher());

    let err = service
        .signin("truncated@example.com", "anything")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Hash(HashError::Malformed(_))));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn store_failures_propagate() {
    let service = AuthService::with_hasher(BrokenStore, fast_hasher());

    assert!(matches!(
        service.signup("a@example.com", "pw").await,
        Err(AuthError::Store(StoreError::Backend(_)))
    ));
    assert!(matches!(
        service.signin("a@example.com", "pw").await,
        Err(AuthError::Store(StoreError::Backend(_)))
    ));
}

#[tokio::test]
async fn service_accepts_trait_objects() {
    let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::new());
    let service = AuthService::with_hasher(store, fast_hasher());

    let user = service.signup("dyn@example.com", "pw").await.unwrap();
    assert_ne!(user.id, Uuid::nil());
    assert_eq!(service.signin("dyn@example.com", "pw").await.unwrap(), user);
}
