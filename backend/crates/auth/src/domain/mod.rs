//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_session::AuthSession, credential::Credential, principal::Principal, user::User,
};
pub use repository::{AuthSessionRepository, CredentialRepository, UserRepository};
