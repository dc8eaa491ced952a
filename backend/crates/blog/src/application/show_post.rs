//! Show Post Use Case
//!
//! A single post together with its comments.

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entity::{blog_post::PostWithAuthor, comment::CommentWithAuthor};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

pub struct ShowPostOutput {
    pub post: PostWithAuthor,
    pub comments: Vec<CommentWithAuthor>,
}

pub struct ShowPostUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
}

impl<P, C> ShowPostUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(post_repo: Arc<P>, comment_repo: Arc<C>) -> Self {
        Self {
            post_repo,
            comment_repo,
        }
    }

    pub async fn execute(&self, post_id: &PostId) -> BlogResult<ShowPostOutput> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        let comments = self.comment_repo.list_for_post(post_id).await?;

        Ok(ShowPostOutput { post, comments })
    }
}
