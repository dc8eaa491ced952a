//! Edit Post Use Case

use std::sync::Arc;

use auth::AdminPrincipal;
use kernel::id::PostId;

use crate::application::create_post::PostInput;
use crate::domain::entity::blog_post::BlogPost;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

pub struct EditPostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> EditPostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(
        &self,
        admin: &AdminPrincipal,
        post_id: &PostId,
        input: PostInput,
    ) -> BlogResult<BlogPost> {
        let draft = input.into_draft()?;

        let mut post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?
            .post;

        post.revise(draft, admin.user_id());

        if !self.post_repo.update(&post).await? {
            return Err(BlogError::PostNotFound);
        }

        tracing::info!(post_id = %post.post_id, "Post edited");

        Ok(post)
    }
}
