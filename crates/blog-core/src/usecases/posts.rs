use std::sync::Arc;

use crate::domain::{Post, PostId, UserId};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};

#[derive(Debug, Clone)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub published: Option<bool>,
}

#[derive(Clone)]
pub struct CreatePost {
    posts: Arc<dyn PostRepository>,
}

impl CreatePost {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, input: CreatePostInput) -> Result<Post, DomainError> {
        let post = Post::create(
            input.title,
            input.content,
            input.author_id,
            input.published.unwrap_or(false),
        )?;
        Ok(self.posts.create(post).await?)
    }
}

/// Read-side queries over posts.
#[derive(Clone)]
pub struct GetPost {
    posts: Arc<dyn PostRepository>,
}

impl GetPost {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn by_id(&self, id: &PostId) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id.as_str()))
    }

    pub async fn all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn published(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_published().await?)
    }

    pub async fn by_author(&self, author_id: &UserId) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(author_id).await?)
    }
}

/// Partial update: absent fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

#[derive(Clone)]
pub struct UpdatePost {
    posts: Arc<dyn PostRepository>,
}

impl UpdatePost {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(
        &self,
        post_id: &PostId,
        input: UpdatePostInput,
        requester_id: &UserId,
    ) -> Result<Post, DomainError> {
        let mut post = load_owned(self.posts.as_ref(), post_id, requester_id, "update").await?;

        if input.title.is_some() || input.content.is_some() {
            post.update(input.title, input.content)?;
        }
        match input.published {
            Some(true) => post.publish(),
            Some(false) => post.unpublish(),
            None => {}
        }

        Ok(self.posts.update(post).await?)
    }
}

/// Delete a post together with its comments.
#[derive(Clone)]
pub struct DeletePost {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl DeletePost {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn execute(&self, post_id: &PostId, requester_id: &UserId) -> Result<(), DomainError> {
        let post = load_owned(self.posts.as_ref(), post_id, requester_id, "delete").await?;

        self.comments.delete_by_post(post.id()).await?;
        self.posts.delete(post.id()).await?;
        Ok(())
    }
}

/// Fetch a post and check that `requester_id` wrote it.
async fn load_owned(
    posts: &dyn PostRepository,
    post_id: &PostId,
    requester_id: &UserId,
    action: &str,
) -> Result<Post, DomainError> {
    let post = posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id.as_str()))?;

    if !post.is_authored_by(requester_id) {
        return Err(DomainError::unauthorized(format!(
            "You are not authorized to {action} this post"
        )));
    }
    Ok(post)
}
