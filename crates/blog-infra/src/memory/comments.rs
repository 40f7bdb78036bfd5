use async_trait::async_trait;

use blog_core::domain::{Comment, PostId, UserId};
use blog_core::error::RepoError;
use blog_core::ports::CommentRepository;

use super::InMemoryRepository;

/// In-memory comment repository.
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .select(
                |c| c.post_id() == post_id,
                |a, b| {
                    a.created_at()
                        .cmp(&b.created_at())
                        .then_with(|| a.id().as_str().cmp(b.id().as_str()))
                },
            )
            .await)
    }

    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .select(
                |c| c.author_id() == author_id,
                |a, b| {
                    b.created_at()
                        .cmp(&a.created_at())
                        .then_with(|| a.id().as_str().cmp(b.id().as_str()))
                },
            )
            .await)
    }

    async fn delete_by_post(&self, post_id: &PostId) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        rows.retain(|_, c| c.post_id() != post_id);
        Ok(())
    }
}
