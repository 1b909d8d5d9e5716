/// The credential persistence seam.
///
/// [`CredentialStore`] is the only view of persistence the auth core has:
/// lookup by email, lookup by id, and save. Everything else the backend
/// stores (trips, destinations, countries) belongs to the external data
/// layer and never passes through here.
///
/// Two implementations are provided. [`PgCredentialStore`] backs production
/// with Postgres; [`MemoryCredentialStore`] backs tests and database-less
/// local runs with the same observable contract, including the duplicate
/// email rejection.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY,
///     fullname VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     is_admin BOOLEAN NOT NULL DEFAULT FALSE,
///     lang_code VARCHAR(16),
///     created_at TIMESTAMPTZ NOT NULL,
///     updated_at TIMESTAMPTZ NOT NULL
/// );
/// ```

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::User;

/// Error type for credential store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The email uniqueness constraint rejected a save.
    ///
    /// This is a normal, reportable outcome; concurrent registrations with
    /// the same email are resolved here, not by in-core locking.
    #[error("email is already registered")]
    DuplicateEmail,

    /// Backend failure
    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),
}

/// Lookup and save operations over stored user credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Inserts the record, or updates it if the id already exists.
    async fn save(&self, user: &User) -> Result<(), StoreError>;
}

/// Postgres-backed credential store.
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password_hash, is_admin, lang_code, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password_hash, is_admin, lang_code, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, fullname, email, password_hash, is_admin, lang_code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET fullname = EXCLUDED.fullname,
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                is_admin = EXCLUDED.is_admin,
                lang_code = EXCLUDED.lang_code,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(&user.lang_code)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_save_error)?;

        Ok(())
    }
}

/// Surfaces a unique-email violation as [`StoreError::DuplicateEmail`].
fn map_save_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.constraint().map_or(false, |c| c.contains("email")) {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(err)
}

/// In-memory credential store honoring the same contract as Postgres.
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        let email_taken = users
            .values()
            .any(|u| u.email == user.email && u.id != user.id);
        if email_taken {
            return Err(StoreError::DuplicateEmail);
        }

        users.insert(user.id, user.clone());
        Ok(())
    }
}
