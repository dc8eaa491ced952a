//! Principal
//!
//! The authenticated actor of a request, resolved from its session.

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub user_role: UserRole,
}

impl Principal {
    pub fn new(user_id: UserId, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}
