//! User Entity
//!
//! Core account entity containing non-sensitive user data.

use chrono::{DateTime, Utc};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{
    display_name::DisplayName, identity_key::IdentityKey, user_id::UserId, user_role::UserRole,
};

/// User entity
///
/// The password credential lives in the separate `Credential` entity.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Name shown next to comments
    pub display_name: DisplayName,
    /// SHA-512 of the normalized email (unique)
    pub email_key: IdentityKey,
    /// Reader or the blog's administrator
    pub user_role: UserRole,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(display_name: DisplayName, email_key: IdentityKey, user_role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            display_name,
            email_key,
            user_role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    /// The principal acting on behalf of this user
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.user_role)
    }
}
