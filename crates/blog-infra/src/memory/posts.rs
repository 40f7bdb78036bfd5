use std::cmp::Ordering;

use async_trait::async_trait;

use blog_core::domain::{Post, UserId};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::InMemoryRepository;

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryRepository<Post>;

fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| a.id().as_str().cmp(b.id().as_str()))
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.select(|_| true, newest_first).await)
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.select(Post::published, newest_first).await)
    }

    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .select(|p| p.is_authored_by(author_id), newest_first)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::PostId;
    use blog_core::ports::BaseRepository;
    use chrono::{TimeDelta, Utc};

    fn post_at(id: &str, author: &str, published: bool, minutes_ago: i64) -> Post {
        let at = Utc::now() - TimeDelta::minutes(minutes_ago);
        Post::restore(
            PostId::new(id).unwrap(),
            "A title",
            "Long enough content",
            UserId::new(author).unwrap(),
            published,
            at,
            at,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_listings_are_newest_first_and_filtered() {
        let repo = InMemoryPostRepository::new();
        repo.create(post_at("p-old", "u1", true, 30)).await.unwrap();
        repo.create(post_at("p-new", "u2", false, 1)).await.unwrap();
        repo.create(post_at("p-mid", "u1", false, 10)).await.unwrap();

        let ids = |posts: Vec<Post>| -> Vec<String> {
            posts.iter().map(|p| p.id().to_string()).collect()
        };

        assert_eq!(
            ids(repo.find_all().await.unwrap()),
            vec!["p-new", "p-mid", "p-old"]
        );
        assert_eq!(ids(repo.find_published().await.unwrap()), vec!["p-old"]);
        assert_eq!(
            ids(repo
                .find_by_author(&UserId::new("u1").unwrap())
                .await
                .unwrap()),
            vec!["p-mid", "p-old"]
        );
    }

    #[tokio::test]
    async fn test_update_replaces_row() {
        let repo = InMemoryPostRepository::new();
        let mut post = repo.create(post_at("p1", "u1", false, 0)).await.unwrap();

        post.publish();
        repo.update(post.clone()).await.unwrap();

        let stored = repo.find_by_id(post.id()).await.unwrap().unwrap();
        assert!(stored.published());
        assert_eq!(stored, post);
    }
}
