//! User controller: request-shaped operations over the repository.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{UpdateUser, User};
use crate::repository::{RepositoryError, UserRepository};

const MAX_USERNAME_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Clone)]
pub struct UserController {
    repo: Arc<dyn UserRepository>,
}

impl UserController {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, ControllerError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    /// Apply a profile update and return the record as written.
    pub async fn update_user(&self, id: Uuid, update: UpdateUser) -> Result<User, ControllerError> {
        let username = update.username.trim();
        if username.is_empty() {
            return Err(ControllerError::Validation("username must not be empty".into()));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(ControllerError::Validation(format!(
                "username must be at most {} characters",
                MAX_USERNAME_LEN
            )));
        }

        let mut user = self.repo.get_by_id(id).await?;
        user.username = username.to_string();
        user.is_verified = update.is_verified;
        self.repo.update(&user).await?;
        Ok(user)
    }

    pub async fn streaming_users(&self) -> Result<Vec<User>, ControllerError> {
        Ok(self.repo.get_streaming_users().await?)
    }
}
