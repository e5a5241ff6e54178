//! # Passgate (credential signup and signin)
//!
//! `passgate` registers users and authenticates them against salted, hashed
//! password records.
//!
//! ## Password encoding
//!
//! Stored passwords are `"<salt>.<hash>"`: a 16-byte random salt and a 32-byte
//! Argon2id derivation, both lowercase hex. The plaintext is never persisted.
//!
//! ## Stores
//!
//! Persistence sits behind the [`store::CredentialStore`] trait. The crate ships an
//! in-memory store (tests, embedding) and a PostgreSQL store backed by `sqlx`.
//! Email uniqueness is checked by [`AuthService`] before every insert; stores that
//! enforce it themselves report [`store::StoreError::Conflict`], which is mapped to
//! the same [`AuthError::DuplicateEmail`] failure.

pub mod auth;
pub mod cli;
pub mod password;
pub mod store;

pub use auth::{AuthError, AuthService, User};
pub use password::{HashError, PasswordHasher};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
