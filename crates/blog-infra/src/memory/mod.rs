//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Ordering and error semantics match the PostgreSQL repositories.

mod comments;
mod posts;
mod users;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{Comment, CommentId, Post, PostId, User, UserId};
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

pub use comments::InMemoryCommentRepository;
pub use posts::InMemoryPostRepository;
pub use users::InMemoryUserRepository;

/// An entity that can be held by [`InMemoryRepository`].
pub trait Stored: Clone + Send + Sync + 'static {
    type Id: AsRef<str> + Send + Sync;

    fn key(&self) -> &Self::Id;

    /// Description of the unique column `other` already holds, if it clashes
    /// with `self`.
    fn unique_clash(&self, _other: &Self) -> Option<String> {
        None
    }
}

impl Stored for User {
    type Id = UserId;

    fn key(&self) -> &UserId {
        self.id()
    }

    fn unique_clash(&self, other: &Self) -> Option<String> {
        (self.email() == other.email()).then(|| "duplicate email".to_string())
    }
}

impl Stored for Post {
    type Id = PostId;

    fn key(&self) -> &PostId {
        self.id()
    }
}

impl Stored for Comment {
    type Id = CommentId;

    fn key(&self) -> &CommentId {
        self.id()
    }
}

/// Generic in-memory repository keyed by entity id.
pub struct InMemoryRepository<T: Stored> {
    pub(crate) rows: RwLock<HashMap<String, T>>,
}

impl<T: Stored> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot of rows matching `keep`, sorted with `order`.
    pub(crate) async fn select<F, O>(&self, keep: F, order: O) -> Vec<T>
    where
        F: Fn(&T) -> bool,
        O: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let rows = self.rows.read().await;
        let mut out: Vec<T> = rows.values().filter(|row| keep(row)).cloned().collect();
        out.sort_by(order);
        out
    }
}

impl<T: Stored> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Stored> BaseRepository<T, T::Id> for InMemoryRepository<T> {
    async fn create(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        let key = entity.key().as_ref().to_string();
        if rows.contains_key(&key) {
            return Err(RepoError::Constraint(format!("duplicate id {key}")));
        }
        if let Some(clash) = rows.values().find_map(|row| entity.unique_clash(row)) {
            return Err(RepoError::Constraint(clash));
        }
        rows.insert(key, entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.get(id.as_ref()).cloned())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        let key = entity.key().as_ref();
        let clash = rows
            .iter()
            .filter(|(other, _)| other.as_str() != key)
            .find_map(|(_, row)| entity.unique_clash(row));
        if let Some(clash) = clash {
            return Err(RepoError::Constraint(clash));
        }
        match rows.get_mut(key) {
            Some(row) => {
                *row = entity.clone();
                Ok(entity)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: &T::Id) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        rows.remove(id.as_ref());
        Ok(())
    }
}
