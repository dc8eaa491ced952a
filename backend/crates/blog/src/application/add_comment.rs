//! Add Comment Use Case
//!
//! Any logged-in account may comment; anonymous callers get
//! `BlogError::LoginRequired`.

use std::sync::Arc;

use auth::Principal;
use kernel::id::PostId;

use crate::domain::entity::comment::Comment;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::value_object::comment_text::CommentText;
use crate::error::{BlogError, BlogResult};

pub struct AddCommentInput {
    pub post_id: PostId,
    pub text: String,
}

pub struct AddCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
}

impl<P, C> AddCommentUseCase<P, C>
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

    pub async fn execute(
        &self,
        principal: Option<&Principal>,
        input: AddCommentInput,
    ) -> BlogResult<Comment> {
        let Some(principal) = principal else {
            tracing::info!(post_id = %input.post_id, "Anonymous comment refused");
            return Err(BlogError::LoginRequired);
        };

        let text = CommentText::new(&input.text)?;

        if self.post_repo.find_by_id(&input.post_id).await?.is_none() {
            return Err(BlogError::PostNotFound);
        }

        let comment = Comment::new(input.post_id, principal.user_id, text);
        self.comment_repo.create(&comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %comment.post_id,
            author_id = %comment.author_id,
            "Comment added"
        );

        Ok(comment)
    }
}
