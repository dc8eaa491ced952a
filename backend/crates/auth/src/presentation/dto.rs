//! API DTOs (Data Transfer Objects)
//!
//! Request types carry passwords and deliberately do not implement `Debug`.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Account (register/login response)
// ============================================================================

/// The logged-in account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub user_id: String,
    pub display_name: String,
    pub role: UserRole,
    pub expires_at_ms: i64,
}

impl AccountResponse {
    pub fn new(user: &User, expires_at_ms: i64) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            display_name: user.display_name.to_string(),
            role: user.user_role,
            expires_at_ms,
        }
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at_ms: Option<i64>,
}

impl SessionStatusResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            role: None,
            expires_at_ms: None,
        }
    }
}
