use std::sync::Arc;

use crate::domain::{Comment, PostId, UserId};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};

#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: String,
}

/// Add a comment under an existing post.
#[derive(Clone)]
pub struct CreateComment {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CreateComment {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    pub async fn execute(&self, input: CreateCommentInput) -> Result<Comment, DomainError> {
        if self.posts.find_by_id(&input.post_id).await?.is_none() {
            return Err(DomainError::not_found("Post", input.post_id.as_str()));
        }

        let comment = Comment::create(input.post_id, input.author_id, input.content)?;
        Ok(self.comments.create(comment).await?)
    }
}

#[derive(Clone)]
pub struct GetComment {
    comments: Arc<dyn CommentRepository>,
}

impl GetComment {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    pub async fn by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_by_post(post_id).await?)
    }
}
