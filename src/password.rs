//! Salted password hashing.
//!
//! Passwords are derived with Argon2id over a per-password random salt and
//! stored as `"<salt>.<hash>"`, both components lowercase hex. The delimiter is
//! outside the hex alphabet, so splitting is unambiguous.

use argon2::{Algorithm, Argon2, Version};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

pub use argon2::Params;

/// Separator between the salt and the derived hash.
pub const DELIMITER: char = '.';

/// Random bytes per salt (hex encoded to 32 characters).
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (hex encoded to 64 characters).
pub const HASH_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum HashError {
    /// The stored value is not a `<salt>.<hash>` pair of hex strings.
    #[error("malformed password hash: {0}")]
    Malformed(&'static str),

    #[error("argon2 failure: {0}")]
    Argon2(String),
}

/// Argon2id hasher producing `<salt>.<hash>` encodings.
///
/// The parameters are not part of the encoding, so every hasher that verifies a
/// stored value must be built with the parameters that produced it.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    #[must_use]
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Hash `password` with a fresh salt from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns an error if Argon2 rejects the parameters or input.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let derived = self.derive(password, &salt)?;

        Ok(format!(
            "{}{DELIMITER}{}",
            hex::encode(salt),
            hex::encode(derived)
        ))
    }

    /// Check `password` against an `encoded` value produced by [`Self::hash`].
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Malformed`] if `encoded` is not a valid encoding, or an
    /// Argon2 error if the derivation fails. A wrong password is `Ok(false)`.
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool, HashError> {
        let (salt, expected) = split_encoded(encoded)?;

        let salt = hex::decode(salt).map_err(|_| HashError::Malformed("salt is not hex"))?;
        let expected =
            hex::decode(expected).map_err(|_| HashError::Malformed("hash is not hex"))?;

        if expected.len() != HASH_LEN {
            return Err(HashError::Malformed("hash has wrong length"));
        }

        let derived = self.derive(password, &salt)?;

        Ok(constant_time_eq(&derived, &expected))
    }

    fn derive(&self, password: &str, salt: &[u8]) -> Result<[u8; HASH_LEN], HashError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let mut out = [0u8; HASH_LEN];
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut out)
            .map_err(|e| HashError::Argon2(e.to_string()))?;

        Ok(out)
    }
}

fn split_encoded(encoded: &str) -> Result<(&str, &str), HashError> {
    let (salt, hash) = encoded
        .split_once(DELIMITER)
        .ok_or(HashError::Malformed("missing delimiter"))?;

    if salt.is_empty() || hash.is_empty() {
        return Err(HashError::Malformed("empty component"));
    }

    if hash.contains(DELIMITER) {
        return Err(HashError::Malformed("too many components"));
    }

    Ok((salt, hash))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
