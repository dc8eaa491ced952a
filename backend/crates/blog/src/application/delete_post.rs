//! Delete Post Use Case

use std::sync::Arc;

use auth::AdminPrincipal;
use kernel::id::PostId;

use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

pub struct DeletePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> DeletePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Delete the post together with its comments
    pub async fn execute(&self, admin: &AdminPrincipal, post_id: &PostId) -> BlogResult<()> {
        if !self.post_repo.delete(post_id).await? {
            return Err(BlogError::PostNotFound);
        }

        tracing::info!(post_id = %post_id, admin_id = %admin.user_id(), "Post deleted");

        Ok(())
    }
}
