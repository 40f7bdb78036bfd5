//! Session-backed token service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use blog_core::domain::{Email, UserId};
use blog_core::ports::{AuthError, SessionRecord, SessionStore, TokenClaims, TokenService};

/// Issues random opaque session ids and resolves them through a [`SessionStore`].
///
/// Unlike signed tokens, a session can be revoked server-side on logout.
pub struct SessionTokenService {
    store: Arc<dyn SessionStore>,
    ttl: TimeDelta,
}

impl SessionTokenService {
    /// Fails unless `ttl_secs` is positive and representable.
    pub fn new(store: Arc<dyn SessionStore>, ttl_secs: i64) -> Result<Self, AuthError> {
        let ttl = TimeDelta::try_seconds(ttl_secs)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or_else(|| AuthError::InvalidLifetime(format!("{ttl_secs} seconds")))?;

        Ok(Self { store, ttl })
    }

    fn new_session_id() -> String {
        // Two v4 UUIDs give 244 random bits.
        format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
    }
}

#[async_trait]
impl TokenService for SessionTokenService {
    async fn generate_token(&self, user_id: &UserId, email: &Email) -> Result<String, AuthError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::InvalidLifetime("expiry out of range".to_string()))?;
        let session_id = Self::new_session_id();
        let record = SessionRecord {
            user_id: user_id.to_string(),
            email: email.to_string(),
            expires_at,
        };

        self.store
            .put(&session_id, &record)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        tracing::debug!(user_id = %user_id, "Session created");
        Ok(session_id)
    }

    async fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let record = self
            .store
            .get(token)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?
            .ok_or_else(|| AuthError::InvalidToken("unknown session".to_string()))?;

        if record.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        Ok(TokenClaims {
            user_id: UserId::new(record.user_id)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?,
            email: Email::new(record.email).map_err(|e| AuthError::InvalidToken(e.to_string()))?,
            expires_at: record.expires_at,
        })
    }

    async fn revoke_token(&self, token: &str) -> Result<(), AuthError> {
        self.store
            .remove(token)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))
    }

    fn expiration_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;

    fn service(ttl_secs: i64) -> SessionTokenService {
        SessionTokenService::new(Arc::new(InMemorySessionStore::new()), ttl_secs).unwrap()
    }

    fn user() -> (UserId, Email) {
        (UserId::new("user-1").unwrap(), Email::new("a@x.com").unwrap())
    }

    #[tokio::test]
    async fn test_issue_validate_revoke() {
        let service = service(3600);
        let (user_id, email) = user();

        let token = service.generate_token(&user_id, &email).await.unwrap();
        assert_eq!(token.len(), 64);

        let claims = service.validate_token(&token).await.unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, email);

        service.revoke_token(&token).await.unwrap();
        assert!(matches!(
            service.validate_token(&token).await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_and_expired_sessions_are_rejected() {
        let (user_id, email) = user();
        assert!(service(3600).validate_token("nope").await.is_err());

        let store = Arc::new(InMemorySessionStore::new());
        let service = SessionTokenService::new(store.clone(), 3600).unwrap();
        let record = SessionRecord {
            user_id: user_id.to_string(),
            email: email.to_string(),
            expires_at: Utc::now() - TimeDelta::seconds(1),
        };
        store.put("stale", &record).await.unwrap();
        assert!(service.validate_token("stale").await.is_err());
    }

    #[test]
    fn test_unusable_lifetime_is_rejected() {
        for ttl_secs in [0, -5, i64::MAX] {
            let result = SessionTokenService::new(Arc::new(InMemorySessionStore::new()), ttl_secs);
            assert!(matches!(result, Err(AuthError::InvalidLifetime(_))));
        }
    }

    #[tokio::test]
    async fn test_session_ids_are_unique() {
        let service = service(60);
        let (user_id, email) = user();
        let a = service.generate_token(&user_id, &email).await.unwrap();
        let b = service.generate_token(&user_id, &email).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(service.expiration_seconds(), 60);
    }
}
