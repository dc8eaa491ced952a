//! Auth Session Entity
//!
//! Represents an authenticated user session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// User role at session creation
    pub user_role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, user_role: UserRole, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            user_role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }

    /// Slide the expiry forward for active sessions
    ///
    /// Extends to (now + ttl) once less than half of `ttl` remains.
    /// Returns whether the expiry changed.
    pub fn extend_if_needed(&mut self, ttl: Duration) -> bool {
        let now = Utc::now();

        if self.expires_at_ms < (now + (ttl / 2)).timestamp_millis() {
            self.expires_at_ms = (now + ttl).timestamp_millis();
            return true;
        }

        false
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.user_role)
    }
}
