//! PostgreSQL credential store.

use super::{CredentialStore, StoreError};
use crate::{auth::User, APP_USER_AGENT};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool, Row,
};
use std::str::FromStr;
use tracing::{info_span, instrument, Instrument};
use uuid::Uuid;

/// Table definition used by [`PgStore::apply_schema`].
pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `dsn` with a small pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the DSN is invalid or the database is unreachable.
    #[instrument(skip(dsn))]
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self> {
        let options = PgConnectOptions::from_str(dsn)
            .context("invalid database connection string")?
            .application_name(APP_USER_AGENT);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("failed to connect to database")?;

        Ok(Self::new(pool))
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `users` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails.
    pub async fn apply_schema(&self) -> Result<()> {
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "CREATE",
            db.statement = SCHEMA_SQL
        );
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to apply schema")?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, StoreError> {
        let query = "SELECT id, email, password FROM users WHERE email = $1 ORDER BY seq";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let rows = sqlx::query(query)
            .bind(email)
            .fetch_all(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup users by email")?;

        Ok(rows
            .into_iter()
            .map(|row| User {
                id: row.get("id"),
                email: row.get("email"),
                password: row.get("password"),
            })
            .collect())
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let query = "INSERT INTO users (id, email, password) VALUES ($1, $2, $3)";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let id = Uuid::new_v4();

        match sqlx::query(query)
            .bind(id)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .instrument(span)
            .await
        {
            Ok(_) => Ok(User::new(id, email, password_hash)),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict),
            Err(err) => Err(anyhow::Error::new(err)
                .context("failed to insert user")
                .into()),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
