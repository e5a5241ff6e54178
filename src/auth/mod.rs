//! Signup and signin over a [`CredentialStore`].
//!
//! The service keeps no state of its own: every call reads from (and for signup,
//! writes to) the store. Argon2 work runs on the blocking pool so async callers
//! are not stalled while a password is derived.

mod error;
mod user;

#[cfg(test)]
mod tests;

pub use self::error::AuthError;
pub use self::user::User;

use crate::{password::PasswordHasher, store::CredentialStore};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct AuthService<S> {
    store: S,
    hasher: PasswordHasher,
}

impl<S: CredentialStore> AuthService<S> {
    /// Service using the default Argon2id parameters.
    pub fn new(store: S) -> Self {
        Self::with_hasher(store, PasswordHasher::default())
    }

    pub fn with_hasher(store: S, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register `email` with a salted hash of `password`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] if either argument is empty.
    /// - [`AuthError::DuplicateEmail`] if the email is already registered, either
    ///   found by lookup or rejected by the store on insert.
    /// - [`AuthError::Store`] / [`AuthError::Hash`] on infrastructure failures.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let existing = self.store.find_by_email(email).await?;
        if !existing.is_empty() {
            warn!("email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let encoded = self.hash(password).await?;

        let user = self.store.insert(email, &encoded).await.inspect_err(|e| {
            if matches!(e, crate::store::StoreError::Conflict) {
                warn!("email registered concurrently");
            }
        })?;

        info!(user_id = %user.id, "user signed up");

        Ok(user)
    }

    /// Authenticate `email` with `password`, returning the stored user.
    ///
    /// When the store holds several records for the email, the oldest is used.
    ///
    /// # Errors
    ///
    /// - [`AuthError::UserNotFound`] if no user has this email.
    /// - [`AuthError::InvalidPassword`] if the password does not match.
    /// - [`AuthError::Store`] / [`AuthError::Hash`] on infrastructure failures,
    ///   including a stored password that is not a valid encoding.
    #[instrument(skip(self, password))]
    pub async fn signin(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let users = self.store.find_by_email(email).await?;

        if users.len() > 1 {
            warn!(count = users.len(), "multiple users share this email");
        }

        let Some(user) = users.into_iter().next() else {
            debug!("no user for email");
            return Err(AuthError::UserNotFound);
        };

        if !self.verify(password, &user.password).await? {
            debug!(user_id = %user.id, "password mismatch");
            return Err(AuthError::InvalidPassword);
        }

        info!(user_id = %user.id, "user signed in");

        Ok(user)
    }

    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let password = SecretString::from(password.to_owned());

        let encoded = tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))??;

        Ok(encoded)
    }

    async fn verify(&self, password: &str, encoded: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let password = SecretString::from(password.to_owned());
        let encoded = encoded.to_owned();

        let matched =
            tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &encoded))
                .await
                .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))??;

        Ok(matched)
    }
}
