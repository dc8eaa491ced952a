//! Application Layer
//!
//! Use cases. Post mutations take an `AdminPrincipal`, so they can only be
//! reached through the access guard.

pub mod add_comment;
pub mod create_post;
pub mod delete_post;
pub mod edit_post;
pub mod list_posts;
pub mod show_post;

// Re-exports
pub use add_comment::{AddCommentInput, AddCommentUseCase};
pub use create_post::{CreatePostUseCase, PostInput};
pub use delete_post::DeletePostUseCase;
pub use edit_post::EditPostUseCase;
pub use list_posts::ListPostsUseCase;
pub use show_post::{ShowPostOutput, ShowPostUseCase};
