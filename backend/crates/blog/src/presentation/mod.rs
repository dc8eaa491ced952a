//! Presentation Layer
//!
//! HTTP handlers, DTOs and router. Expects `auth::resolve_principal` to run
//! in front of it.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{BlogAppState, BlogStore};
pub use router::blog_router;
