use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::auth::repo_types::Identity;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence seam used by the auth flows.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;
    async fn find_identity_by_id(&self, id: i64) -> Result<Option<Identity>, StoreError>;
    async fn create_identity(&self, email: &str, password_hash: &str)
        -> Result<Identity, StoreError>;
}

impl Identity {
    /// Find a user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<Identity>, sqlx::Error> {
        sqlx::query_as::<_, Identity>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<Identity>, sqlx::Error> {
        sqlx::query_as::<_, Identity>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with hashed password.
    pub async fn create(db: &SqlitePool, email: &str, password_hash: &str) -> Result<Identity, StoreError> {
        sqlx::query_as::<_, Identity>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES (?, ?)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail
            }
            other => StoreError::Database(other),
        })
    }
}

/// `IdentityStore` backed by the `users` table.
#[derive(Clone)]
pub struct SqlIdentityStore {
    db: SqlitePool,
}

impl SqlIdentityStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityStore for SqlIdentityStore {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(Identity::find_by_email(&self.db, email).await?)
    }

    async fn find_identity_by_id(&self, id: i64) -> Result<Option<Identity>, StoreError> {
        Ok(Identity::find_by_id(&self.db, id).await?)
    }

    async fn create_identity(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Identity, StoreError> {
        Identity::create(&self.db, email, password_hash).await
    }
}
