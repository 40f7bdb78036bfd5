//! Server-side session storage port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a session id resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Session store trait - abstraction over session backends (Redis, in-memory).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a record under `session_id` until it expires.
    async fn put(&self, session_id: &str, record: &SessionRecord) -> Result<(), SessionError>;

    /// Fetch a live record. Expired records are treated as absent.
    async fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionError>;

    /// Remove a record. Removing an unknown id is not an error.
    async fn remove(&self, session_id: &str) -> Result<(), SessionError>;
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
