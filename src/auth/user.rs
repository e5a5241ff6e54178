use serde::Serialize;
use uuid::Uuid;

/// A registered user.
///
/// `password` holds the `<salt>.<hash>` encoding, never the plaintext. It is
/// skipped when serializing so encoded hashes stay out of responses and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    pub fn new(id: Uuid, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            password: password.into(),
        }
    }
}
