//! Domain Layer
//!
//! Posts, comments, drafts and the repository interfaces.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{
    blog_post::{BlogPost, PostWithAuthor},
    comment::{Comment, CommentWithAuthor},
};
pub use repository::{CommentRepository, PostRepository};
