use crate::store::PgStore;
use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database settings shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub dsn: String,
    pub db_password: Option<SecretString>,
    pub max_connections: u32,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(dsn: String) -> Self {
        Self {
            dsn,
            db_password: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn set_db_password(&mut self, password: SecretString) {
        self.db_password = Some(password);
    }

    /// DSN with the database password injected, if one was given separately.
    ///
    /// # Errors
    ///
    /// Returns an error if the DSN is not a URL or cannot carry a password.
    pub fn connection_string(&self) -> Result<SecretString> {
        let mut dsn = Url::parse(&self.dsn)?;

        if let Some(password) = &self.db_password {
            dsn.set_password(Some(password.expose_secret()))
                .map_err(|()| anyhow!("Error setting password"))?;
        }

        Ok(SecretString::from(dsn.to_string()))
    }

    /// Open the PostgreSQL credential store.
    ///
    /// # Errors
    ///
    /// Returns an error if the DSN is invalid or the database is unreachable.
    pub async fn connect(&self) -> Result<PgStore> {
        let dsn = self.connection_string()?;

        PgStore::connect(dsn.expose_secret(), self.max_connections).await
    }
}
