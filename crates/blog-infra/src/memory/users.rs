use async_trait::async_trait;

use blog_core::domain::{Email, User};
use blog_core::error::RepoError;
use blog_core::ports::UserRepository;

use super::InMemoryRepository;

/// In-memory user repository.
pub type InMemoryUserRepository = InMemoryRepository<User>;

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %email.masked(), "Finding user by email");

        let rows = self.rows.read().await;
        Ok(rows.values().find(|u| u.email() == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self
            .select(
                |_| true,
                |a, b| {
                    a.created_at()
                        .cmp(&b.created_at())
                        .then_with(|| a.id().as_str().cmp(b.id().as_str()))
                },
            )
            .await)
    }
}
