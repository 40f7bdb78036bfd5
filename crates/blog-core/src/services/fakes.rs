//! Deterministic credential services for unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::AuthService;
use crate::domain::{Email, UserId};
use crate::ports::{AuthError, PasswordService, TokenClaims, TokenService};

pub(crate) struct PlainPasswords;

#[async_trait]
impl PasswordService for PlainPasswords {
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        match hash.strip_prefix("plain:") {
            Some(stored) => Ok(stored == password),
            None => Err(AuthError::HashingError("unknown format".to_string())),
        }
    }
}

/// Tokens are `user_id|email`; the literal `expired` is always expired.
pub(crate) struct EchoTokens;

#[async_trait]
impl TokenService for EchoTokens {
    async fn generate_token(&self, user_id: &UserId, email: &Email) -> Result<String, AuthError> {
        Ok(format!("{user_id}|{email}"))
    }

    async fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token == "expired" {
            return Err(AuthError::TokenExpired);
        }
        let (user_id, email) = token
            .split_once('|')
            .ok_or_else(|| AuthError::InvalidToken("malformed".to_string()))?;
        Ok(TokenClaims {
            user_id: UserId::new(user_id).map_err(|e| AuthError::InvalidToken(e.to_string()))?,
            email: Email::new(email).map_err(|e| AuthError::InvalidToken(e.to_string()))?,
            expires_at: Utc::now(),
        })
    }

    async fn revoke_token(&self, _token: &str) -> Result<(), AuthError> {
        Ok(())
    }

    fn expiration_seconds(&self) -> i64 {
        60
    }
}

pub(crate) fn auth_service() -> AuthService {
    AuthService::new(Arc::new(PlainPasswords), Arc::new(EchoTokens))
}
