use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
///
/// The blog has exactly one author. Everyone else can read and comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Reader = 0,
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Reader => "reader",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Decode a stored role id
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(UserRole::Reader),
            1 => Some(UserRole::Admin),
            _ => {
                tracing::error!(role_id = id, "Invalid UserRole id");
                None
            }
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
