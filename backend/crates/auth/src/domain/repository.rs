//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{auth_session::AuthSession, credential::Credential, user::User};
use crate::domain::value_object::{identity_key::IdentityKey, user_id::UserId};
use crate::error::AuthResult;
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a user together with its credential, atomically
    ///
    /// - `AuthError::EmailTaken` if the identity key is already registered
    /// - `AuthError::AdminConflict` if the user is an admin and one exists
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email digest
    async fn find_by_email_key(&self, email_key: &IdentityKey) -> AuthResult<Option<User>>;

    /// Check if an email digest is registered
    async fn exists_by_email_key(&self, email_key: &IdentityKey) -> AuthResult<bool>;

    /// Check if the administrator account exists
    async fn admin_exists(&self) -> AuthResult<bool>;
}

/// Credential repository trait
///
/// Credentials are written only through `UserRepository::create`.
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find credential by user ID
    ///
    /// A malformed stored record is `AuthError::CredentialIntegrity`.
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credential>>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find an unexpired session by ID
    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    /// Update session (expiry, last activity)
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
