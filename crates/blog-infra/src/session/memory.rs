//! In-memory session store - used when Redis is not configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{SessionError, SessionRecord, SessionStore};

/// In-memory session store using a HashMap behind an async RwLock.
///
/// Sessions are lost on process restart and are not shared between
/// server instances.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, session_id: &str, record: &SessionRecord) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        // Abandoned sessions are swept on every write.
        sessions.retain(|_, existing| !existing.is_expired());
        sessions.insert(session_id.to_string(), record.clone());
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionError> {
        let sessions = self.sessions.read().await;
        let Some(record) = sessions.get(session_id) else {
            return Ok(None);
        };

        if record.is_expired() {
            drop(sessions);
            // Clean up expired entry with write lock
            let mut sessions = self.sessions.write().await;
            sessions.remove(session_id);
            return Ok(None);
        }

        Ok(Some(record.clone()))
    }

    async fn remove(&self, session_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    fn record(ttl: TimeDelta) -> SessionRecord {
        SessionRecord {
            user_id: "user-1".to_string(),
            email: "a@x.com".to_string(),
            expires_at: Utc::now() + ttl,
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemorySessionStore::new();
        let rec = record(TimeDelta::hours(1));
        store.put("sid", &rec).await.unwrap();
        assert_eq!(store.get("sid").await.unwrap(), Some(rec));
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let store = InMemorySessionStore::new();
        store.put("sid", &record(TimeDelta::seconds(-1))).await.unwrap();
        assert_eq!(store.get("sid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_sessions_are_swept_on_put() {
        let store = InMemorySessionStore::new();
        store.put("stale", &record(TimeDelta::seconds(-1))).await.unwrap();
        store.put("fresh", &record(TimeDelta::hours(1))).await.unwrap();

        let sessions = store.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key("fresh"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = InMemorySessionStore::new();
        store.put("sid", &record(TimeDelta::hours(1))).await.unwrap();
        store.remove("sid").await.unwrap();
        store.remove("sid").await.unwrap();
        assert_eq!(store.get("sid").await.unwrap(), None);
    }
}
