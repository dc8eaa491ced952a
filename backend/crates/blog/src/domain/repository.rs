//! Repository Traits

use kernel::id::PostId;

use crate::domain::entity::{
    blog_post::{BlogPost, PostWithAuthor},
    comment::{Comment, CommentWithAuthor},
};
use crate::error::BlogResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// All posts with their authors, newest first
    async fn list(&self) -> BlogResult<Vec<PostWithAuthor>>;

    /// Find a post by ID
    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<PostWithAuthor>>;

    /// Insert a post
    ///
    /// `BlogError::TitleTaken` if another post has the same title.
    async fn create(&self, post: &BlogPost) -> BlogResult<()>;

    /// Overwrite a post; `false` if it no longer exists
    ///
    /// `BlogError::TitleTaken` if another post has the same title.
    async fn update(&self, post: &BlogPost) -> BlogResult<bool>;

    /// Delete a post and its comments; `false` if it did not exist
    async fn delete(&self, post_id: &PostId) -> BlogResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Comments of a post with their authors, oldest first
    async fn list_for_post(&self, post_id: &PostId) -> BlogResult<Vec<CommentWithAuthor>>;

    /// Insert a comment
    ///
    /// `BlogError::PostNotFound` if the post is gone.
    async fn create(&self, comment: &Comment) -> BlogResult<()>;
}
