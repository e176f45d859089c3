//! In-memory user repository for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::{NewUser, User};

/// Lock-guarded map keyed by user id.
///
/// Enforces the same username/email uniqueness the Postgres schema does.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed record, bypassing `create` defaults and the
    /// uniqueness checks. Used to seed fixtures.
    pub fn insert(&self, user: User) -> RepositoryResult<()> {
        let mut users = self.users.write().map_err(|_| RepositoryError::LockPoisoned)?;
        users.insert(user.id, user);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> RepositoryResult<User> {
        let users = self.users.read().map_err(|_| RepositoryError::LockPoisoned)?;
        users
            .values()
            .find(|u| predicate(u))
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        self.find(|u| u.id == id)
    }

    async fn get_by_name(&self, username: &str) -> RepositoryResult<User> {
        self.find(|u| u.username == username)
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<User> {
        self.find(|u| u.email == email)
    }

    async fn get_by_api_key(&self, api_key: Uuid) -> RepositoryResult<User> {
        self.find(|u| u.stream_api_key == Some(api_key))
    }

    async fn get_by_facebook_id(&self, facebook_id: &str) -> RepositoryResult<User> {
        self.find(|u| u.facebook_id.as_deref() == Some(facebook_id))
    }

    async fn get_streaming_users(&self) -> RepositoryResult<Vec<User>> {
        let users = self.users.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(users.values().filter(|u| u.is_online).cloned().collect())
    }

    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        let mut users = self.users.write().map_err(|_| RepositoryError::LockPoisoned)?;

        if users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict("users_username_key".into()));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("users_email_key".into()));
        }

        let stored = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_verified: user.is_verified,
            stream_api_key: Some(Uuid::new_v4()),
            facebook_id: None,
            is_online: false,
        };
        users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> RepositoryResult<()> {
        let mut users = self.users.write().map_err(|_| RepositoryError::LockPoisoned)?;

        if !users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound);
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(RepositoryError::Conflict("users_username_key".into()));
        }

        let existing = users.get_mut(&user.id).ok_or(RepositoryError::NotFound)?;
        existing.username = user.username.clone();
        existing.is_verified = user.is_verified;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut users = self.users.write().map_err(|_| RepositoryError::LockPoisoned)?;
        users.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}
