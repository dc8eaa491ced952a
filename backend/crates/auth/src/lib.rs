//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, session tokens, the admin access guard
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router, principal middleware
//!
//! ## Features
//! - Registration with display name + email + password (logged in afterwards)
//! - Login by email, logout, session status
//! - Server-side sessions referenced by an HMAC-signed cookie token
//! - Two roles: the single blog administrator and readers
//!
//! ## Security Model
//! - Passwords derived with PBKDF2-HMAC-SHA512 (see `platform::password`)
//! - Emails are never stored; accounts are keyed by their SHA-512 digest
//! - Login failures look identical to the caller whatever the cause
//! - Admin-only operations require an `AdminPrincipal`, which only the
//!   access guard can produce

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::access_guard::{AdminPrincipal, admin_only, require_admin};
pub use application::config::AuthConfig;
pub use domain::entity::principal::Principal;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{CurrentPrincipal, resolve_principal};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
