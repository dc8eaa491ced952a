//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AuthAppState, AuthStore};
pub use middleware::{CurrentPrincipal, resolve_principal};
pub use router::auth_router;
