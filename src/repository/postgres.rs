//! Postgres-backed user repository.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|-----------------------|-----------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | any other | `Store` |
//! | any other | N/A | `Store` |
//!
//! Lookups use `fetch_optional`, so a missing row is `NotFound` rather than
//! `sqlx::Error::RowNotFound`.
//!
//! Span errors are recorded at DEBUG: `NotFound` and `Conflict` are ordinary
//! outcomes, and store failures are logged where they become a 500.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, Level};
use uuid::Uuid;

use super::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::{NewUser, User};

#[cfg(test)]
const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_verified, stream_api_key, facebook_id, is_online";

pub(crate) const SELECT_BY_ID: &str = "SELECT id, username, email, password_hash, is_verified, stream_api_key, facebook_id, is_online FROM users WHERE id = $1";
pub(crate) const SELECT_BY_NAME: &str = "SELECT id, username, email, password_hash, is_verified, stream_api_key, facebook_id, is_online FROM users WHERE username = $1";
pub(crate) const SELECT_BY_EMAIL: &str = "SELECT id, username, email, password_hash, is_verified, stream_api_key, facebook_id, is_online FROM users WHERE email = $1";
pub(crate) const SELECT_BY_API_KEY: &str = "SELECT id, username, email, password_hash, is_verified, stream_api_key, facebook_id, is_online FROM users WHERE stream_api_key = $1";
pub(crate) const SELECT_BY_FACEBOOK_ID: &str = "SELECT id, username, email, password_hash, is_verified, stream_api_key, facebook_id, is_online FROM users WHERE facebook_id = $1";
pub(crate) const SELECT_STREAMING: &str = "SELECT id, username, email, password_hash, is_verified, stream_api_key, facebook_id, is_online FROM users WHERE is_online = $1";
pub(crate) const INSERT_USER: &str = "INSERT INTO users (username, email, password_hash, is_verified) VALUES ($1, $2, $3, $4) RETURNING id, username, email, password_hash, is_verified, stream_api_key, facebook_id, is_online";
pub(crate) const UPDATE_USER: &str =
    "UPDATE users SET username = $1, is_verified = $2 WHERE id = $3";
pub(crate) const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

const UNIQUE_VIOLATION: &str = "23505";

/// User repository over a shared sqlx pool.
///
/// The pool is cloned in, not created here; sizing and lifetime belong to
/// the caller.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by<T>(
        &self,
        operation: &'static str,
        sql: &'static str,
        value: T,
    ) -> RepositoryResult<User>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    {
        sqlx::query_as::<_, User>(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self), err(level = Level::DEBUG))]
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        self.fetch_one_by("get_by_id", SELECT_BY_ID, id).await
    }

    #[instrument(skip(self), err(level = Level::DEBUG))]
    async fn get_by_name(&self, username: &str) -> RepositoryResult<User> {
        self.fetch_one_by("get_by_name", SELECT_BY_NAME, username.to_owned())
            .await
    }

    #[instrument(skip(self, email), err(level = Level::DEBUG))]
    async fn get_by_email(&self, email: &str) -> RepositoryResult<User> {
        self.fetch_one_by("get_by_email", SELECT_BY_EMAIL, email.to_owned())
            .await
    }

    #[instrument(skip(self, api_key), err(level = Level::DEBUG))]
    async fn get_by_api_key(&self, api_key: Uuid) -> RepositoryResult<User> {
        self.fetch_one_by("get_by_api_key", SELECT_BY_API_KEY, api_key)
            .await
    }

    #[instrument(skip(self), err(level = Level::DEBUG))]
    async fn get_by_facebook_id(&self, facebook_id: &str) -> RepositoryResult<User> {
        self.fetch_one_by(
            "get_by_facebook_id",
            SELECT_BY_FACEBOOK_ID,
            facebook_id.to_owned(),
        )
        .await
    }

    #[instrument(skip(self), err(level = Level::DEBUG))]
    async fn get_streaming_users(&self) -> RepositoryResult<Vec<User>> {
        sqlx::query_as::<_, User>(SELECT_STREAMING)
            .bind(true)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_streaming_users", e))
    }

    #[instrument(skip(self, user), fields(username = %user.username), err(level = Level::DEBUG))]
    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>(INSERT_USER)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.is_verified)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create", e))
    }

    #[instrument(skip(self, user), fields(id = %user.id), err(level = Level::DEBUG))]
    async fn update(&self, user: &User) -> RepositoryResult<()> {
        let result = sqlx::query(UPDATE_USER)
            .bind(&user.username)
            .bind(user.is_verified)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), err(level = Level::DEBUG))]
    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query(DELETE_USER)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let detail = db_err
                .constraint()
                .map(str::to_owned)
                .unwrap_or_else(|| db_err.message().to_owned());
            return RepositoryError::Conflict(detail);
        }
    }
    RepositoryError::Store {
        operation,
        source: err,
    }
}
