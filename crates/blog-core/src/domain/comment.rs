use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CommentId, PostId, UserId, now, trimmed_len};
use crate::error::DomainError;

const CONTENT_MAX: usize = 1000;

/// Comment entity - a reader's reply under a post. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    post_id: PostId,
    author_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    pub fn create(
        post_id: PostId,
        author_id: UserId,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::restore(CommentId::generate(), post_id, author_id, content, now())
    }

    /// Rebuild a comment from persisted fields, re-checking every invariant.
    pub fn restore(
        id: CommentId,
        post_id: PostId,
        author_id: UserId,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        let len = trimmed_len(&content);
        if len == 0 {
            return Err(DomainError::validation("Comment content cannot be empty"));
        }
        if len > CONTENT_MAX {
            return Err(DomainError::validation(
                "Comment content must not exceed 1000 characters",
            ));
        }

        Ok(Self {
            id,
            post_id,
            author_id,
            content,
            created_at,
        })
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(content: &str) -> Result<Comment, DomainError> {
        Comment::create(
            PostId::new("post-1").unwrap(),
            UserId::new("user-1").unwrap(),
            content,
        )
    }

    #[test]
    fn test_content_boundaries() {
        assert!(make("").is_err());
        assert!(make("    ").is_err());
        assert!(make("x").is_ok());
        assert!(make(&"x".repeat(1000)).is_ok());
        assert!(matches!(
            make(&"x".repeat(1001)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_projection_fields() {
        let comment = make("Nice post").unwrap();
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["postId"], "post-1");
        assert_eq!(json["authorId"], "user-1");
        assert_eq!(json["content"], "Nice post");
        assert!(json.get("createdAt").is_some());
    }
}
