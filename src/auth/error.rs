use crate::{password::HashError, store::StoreError};
use thiserror::Error;

/// Failures returned by signup and signin.
///
/// The first four variants are caller mistakes with fixed messages; the rest are
/// infrastructure failures.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email in use")]
    DuplicateEmail,

    #[error("user not found")]
    UserNotFound,

    #[error("bad password")]
    InvalidPassword,

    #[error("email and password are required")]
    MissingCredentials,

    #[error("credential store error: {0}")]
    Store(#[source] StoreError),

    #[error("password hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// True for failures caused by the request rather than the system.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEmail
                | Self::UserNotFound
                | Self::InvalidPassword
                | Self::MissingCredentials
        )
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => Self::DuplicateEmail,
            err @ StoreError::Backend(_) => Self::Store(err),
        }
    }
}
