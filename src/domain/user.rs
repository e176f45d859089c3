//! User record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_verified: bool,
    /// Key the streaming ingest uses to identify this user's broadcasts.
    pub stream_api_key: Option<Uuid>,
    pub facebook_id: Option<String>,
    pub is_online: bool,
}

/// Input for creating a user; the store assigns the identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_verified: bool,
}

/// Mutable profile fields accepted by `POST /v1/user/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    #[serde(default)]
    pub is_verified: bool,
}
