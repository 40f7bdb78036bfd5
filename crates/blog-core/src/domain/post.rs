use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{PostId, UserId, now, trimmed_len};
use crate::error::DomainError;

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 200;
const CONTENT_MIN: usize = 10;

/// Post entity - a blog post owned by its author.
///
/// Title and content change only through [`Post::update`]; the published flag
/// only through [`Post::publish`] and [`Post::unpublish`]. Every mutation
/// refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    author_id: UserId,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn create(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: UserId,
        published: bool,
    ) -> Result<Self, DomainError> {
        let created_at = now();
        Self::restore(
            PostId::generate(),
            title,
            content,
            author_id,
            published,
            created_at,
            created_at,
        )
    }

    /// Rebuild a post from persisted fields, re-checking every invariant.
    pub fn restore(
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: UserId,
        published: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();
        validate_title(&title)?;
        validate_content(&content)?;

        Ok(Self {
            id,
            title,
            content,
            author_id,
            published,
            created_at,
            updated_at,
        })
    }

    /// Replace title and/or content. Nothing changes if either value is invalid.
    pub fn update(
        &mut self,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<(), DomainError> {
        if let Some(title) = &title {
            validate_title(title)?;
        }
        if let Some(content) = &content {
            validate_content(content)?;
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        self.touch();
        Ok(())
    }

    pub fn publish(&mut self) {
        self.published = true;
        self.touch();
    }

    pub fn unpublish(&mut self) {
        self.published = false;
        self.touch();
    }

    /// Whether `user_id` is the recorded author.
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    fn touch(&mut self) {
        self.updated_at = now().max(self.updated_at);
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn published(&self) -> bool {
        self.published
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    let len = trimmed_len(title);
    if len < TITLE_MIN {
        return Err(DomainError::validation(
            "Post title must be at least 3 characters long",
        ));
    }
    if len > TITLE_MAX {
        return Err(DomainError::validation(
            "Post title must not exceed 200 characters",
        ));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), DomainError> {
    if trimmed_len(content) < CONTENT_MIN {
        return Err(DomainError::validation(
            "Post content must be at least 10 characters long",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "Some meaningful content";

    fn author() -> UserId {
        UserId::new("author-1").unwrap()
    }

    fn post() -> Post {
        Post::create("Hello", CONTENT, author(), false).unwrap()
    }

    #[test]
    fn test_title_boundaries_on_create() {
        assert!(Post::create("ab", CONTENT, author(), false).is_err());
        assert!(Post::create("  ab   ", CONTENT, author(), false).is_err());
        assert!(Post::create("abc", CONTENT, author(), false).is_ok());
        assert!(Post::create("t".repeat(200), CONTENT, author(), false).is_ok());
        assert!(matches!(
            Post::create("t".repeat(201), CONTENT, author(), false),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_content_minimum() {
        assert!(Post::create("Title", "too short", author(), false).is_err());
        assert!(Post::create("Title", "   123456789   ", author(), false).is_err());
        assert!(Post::create("Title", "1234567890", author(), false).is_ok());
    }

    #[test]
    fn test_update_title_boundaries() {
        let mut p = post();
        assert!(p.update(Some("ab".to_string()), None).is_err());
        assert!(p.update(Some("t".repeat(201)), None).is_err());
        assert!(p.update(Some("abc".to_string()), None).is_ok());
        assert!(p.update(Some("t".repeat(200)), None).is_ok());
        assert_eq!(p.title().len(), 200);
    }

    #[test]
    fn test_failed_update_leaves_post_untouched() {
        let mut p = post();
        let before = p.clone();

        let result = p.update(Some("A valid title".to_string()), Some("short".to_string()));

        assert!(result.is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut p = post();
        p.update(None, Some("Brand new content here".to_string()))
            .unwrap();
        assert_eq!(p.title(), "Hello");
        assert_eq!(p.content(), "Brand new content here");
        assert!(p.updated_at() >= p.created_at());
    }

    #[test]
    fn test_publish_transitions() {
        let mut p = post();
        assert!(!p.published());
        p.publish();
        assert!(p.published());
        p.unpublish();
        assert!(!p.published());
        assert!(p.updated_at() >= p.created_at());
    }

    #[test]
    fn test_authorship() {
        let p = post();
        assert!(p.is_authored_by(&author()));
        assert!(!p.is_authored_by(&UserId::new("someone-else").unwrap()));
    }

    #[test]
    fn test_projection_fields() {
        let p = post();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["authorId"], "author-1");
        assert_eq!(json["published"], false);
        assert_eq!(json["title"], "Hello");
        assert!(json["createdAt"].as_str().unwrap().ends_with('Z'));
        assert!(json.get("updatedAt").is_some());
    }
}
