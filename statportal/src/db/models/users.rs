//! Database models for users.

use crate::api::models::users::{Role, UserCreate, UserUpdate};
use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub password_hash: Option<String>,
    pub is_active: bool,
}

impl UserCreateDBRequest {
    /// Build from an API request plus the already-computed password hash.
    /// Hashing happens in the handler (on a blocking thread), never here.
    pub fn from_api(api: UserCreate, password_hash: String) -> Self {
        Self {
            email: api.email,
            full_name: api.full_name,
            role: api.role,
            password_hash: Some(password_hash),
            is_active: true,
        }
    }
}

/// Database request for updating a user
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub password_hash: Option<String>,
}

impl UserUpdateDBRequest {
    /// Build from an API request plus an optionally pre-hashed password.
    pub fn from_api(update: UserUpdate, password_hash: Option<String>) -> Self {
        Self {
            full_name: update.full_name,
            role: update.role,
            is_active: update.is_active,
            password_hash,
        }
    }
}

/// Database response for a user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserDBResponse {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
