//! Blog Backend Module
//!
//! Posts and comments, laid out like the auth crate:
//! - `domain/` - Posts, comments, drafts, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Title, subtitle, image URL and comments are sanitized before they are
//! stored. Post bodies are written only by the administrator and are kept
//! as submitted. Creating, editing and deleting posts requires an
//! `auth::AdminPrincipal`; commenting requires any logged-in account.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::handlers::BlogAppState;
pub use presentation::router::blog_router;
