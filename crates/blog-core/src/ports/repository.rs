use async_trait::async_trait;

use crate::domain::{Comment, CommentId, Email, Post, PostId, User, UserId};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Insert a new entity. A duplicate primary key is a `Constraint` error.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: &ID) -> Result<Option<T>, RepoError>;

    /// Replace the stored row for an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Deleting an unknown ID succeeds.
    async fn delete(&self, id: &ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, UserId> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepoError>;

    async fn find_all(&self) -> Result<Vec<User>, RepoError>;
}

/// Post repository. Listings are newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_published(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, CommentId> {
    /// Comments under a post, oldest first.
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepoError>;

    /// Comments written by a user, newest first.
    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Comment>, RepoError>;

    /// Remove every comment under a post.
    async fn delete_by_post(&self, post_id: &PostId) -> Result<(), RepoError>;
}
