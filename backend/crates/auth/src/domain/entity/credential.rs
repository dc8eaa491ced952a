//! Credential Entity
//!
//! The password credential of a user, kept apart from the `User` entity to
//! isolate sensitive data. Created once at registration and never updated;
//! it goes away only together with its user.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_id::UserId, user_password::UserPassword};

#[derive(Debug, Clone)]
pub struct Credential {
    /// Reference to User
    pub user_id: UserId,
    /// Salted PBKDF2 digest
    pub password: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(user_id: UserId, password: UserPassword) -> Self {
        Self {
            user_id,
            password,
            created_at: Utc::now(),
        }
    }
}
