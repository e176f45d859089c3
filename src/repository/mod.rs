//! User persistence.
//!
//! # Data Flow
//! ```text
//! controller
//!     → UserRepository (trait object, injected)
//!         → postgres.rs (one parameterised statement per call)
//!         → memory.rs   (tests / local development)
//!     → User rows or RepositoryError
//! ```
//!
//! # Design Decisions
//! - No caching: every call is a round-trip to the store
//! - No retries, no transactions; the pool is owned by the caller
//! - Uniqueness violations surface as `Conflict`, distinct from store failures
//! - Update/delete touching zero rows is `NotFound`

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{NewUser, User};

pub use memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;

/// Errors returned by user repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("user not found")]
    NotFound,

    /// A unique column (username or email) already holds the value.
    #[error("user conflicts with an existing record: {0}")]
    Conflict(String),

    #[error("store error in {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A writer panicked while holding the in-memory store's lock.
    #[error("user store lock poisoned")]
    LockPoisoned,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Data-access operations over the `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User>;
    async fn get_by_name(&self, username: &str) -> RepositoryResult<User>;
    async fn get_by_email(&self, email: &str) -> RepositoryResult<User>;
    async fn get_by_api_key(&self, api_key: Uuid) -> RepositoryResult<User>;
    async fn get_by_facebook_id(&self, facebook_id: &str) -> RepositoryResult<User>;

    /// Users currently marked online. Order is unspecified.
    async fn get_streaming_users(&self) -> RepositoryResult<Vec<User>>;

    /// Insert a user and return it as stored.
    async fn create(&self, user: NewUser) -> RepositoryResult<User>;

    /// Write `username` and `is_verified` of the user identified by `user.id`.
    async fn update(&self, user: &User) -> RepositoryResult<()>;

    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

#[async_trait]
impl<R> UserRepository for Arc<R>
where
    R: UserRepository + ?Sized,
{
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        (**self).get_by_id(id).await
    }

    async fn get_by_name(&self, username: &str) -> RepositoryResult<User> {
        (**self).get_by_name(username).await
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<User> {
        (**self).get_by_email(email).await
    }

    async fn get_by_api_key(&self, api_key: Uuid) -> RepositoryResult<User> {
        (**self).get_by_api_key(api_key).await
    }

    async fn get_by_facebook_id(&self, facebook_id: &str) -> RepositoryResult<User> {
        (**self).get_by_facebook_id(facebook_id).await
    }

    async fn get_streaming_users(&self) -> RepositoryResult<Vec<User>> {
        (**self).get_streaming_users().await
    }

    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        (**self).create(user).await
    }

    async fn update(&self, user: &User) -> RepositoryResult<()> {
        (**self).update(user).await
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        (**self).delete(id).await
    }
}
