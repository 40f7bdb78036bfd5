//! Redis session store with connection pooling.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use blog_core::ports::{SessionError, SessionRecord, SessionStore};

const KEY_PREFIX: &str = "session:";

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisSessionConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

/// Redis-backed session store. Records expire server-side via `SET EX`.
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn new(config: RedisSessionConfig) -> Result<Self, SessionError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| SessionError::Connection("Connection timed out".to_string()))?
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis session store");

        Ok(Self { conn })
    }

    fn key(session_id: &str) -> String {
        format!("{KEY_PREFIX}{session_id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, session_id: &str, record: &SessionRecord) -> Result<(), SessionError> {
        let value =
            serde_json::to_string(record).map_err(|e| SessionError::Serialization(e.to_string()))?;
        let ttl = (record.expires_at - Utc::now()).num_seconds().max(1) as u64;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(Self::key(session_id), value, ttl)
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionError> {
        let mut conn = self.conn.clone();
        let raw = conn
            .get::<_, Option<String>>(Self::key(session_id))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Redis GET failed");
                SessionError::Operation(e.to_string())
            })?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        let record: SessionRecord =
            serde_json::from_str(&raw).map_err(|e| SessionError::Serialization(e.to_string()))?;

        Ok((!record.is_expired()).then_some(record))
    }

    async fn remove(&self, session_id: &str) -> Result<(), SessionError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::key(session_id))
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    async fn get_test_store() -> Option<RedisSessionStore> {
        let config = RedisSessionConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
        };

        RedisSessionStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_session_round_trip() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        let record = SessionRecord {
            user_id: "user-1".to_string(),
            email: "a@x.com".to_string(),
            expires_at: Utc::now() + TimeDelta::minutes(5),
        };

        store.put("test_sid", &record).await.unwrap();
        assert_eq!(store.get("test_sid").await.unwrap(), Some(record));

        store.remove("test_sid").await.unwrap();
        assert_eq!(store.get("test_sid").await.unwrap(), None);
    }
}
