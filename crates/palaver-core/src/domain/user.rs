//! User entity.

use super::email::Email;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity.
///
/// Users are owned by the external authentication system; this backend only
/// reads them. The password hash travels with the entity so repository rows
/// map one-to-one, but it is never serialized and never reaches a DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique username.
    pub username: String,

    /// User's email address.
    pub email: Email,

    /// Hashed password (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Profile picture URL.
    pub avatar_url: Option<String>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given details.
    #[must_use]
    pub fn new(username: String, email: Email, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
