//! Authentication ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, UserId};

/// Claims recovered from a valid credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub email: Email,
    pub expires_at: DateTime<Utc>,
}

/// Credential lifecycle: issue, validate and revoke opaque tokens.
///
/// Implementations may be stateless (signed tokens) or backed by a
/// server-side session store.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Issue a credential bound to the given user.
    async fn generate_token(&self, user_id: &UserId, email: &Email) -> Result<String, AuthError>;

    /// Validate and decode a credential.
    async fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Invalidate a credential. Stateless implementations may do nothing.
    async fn revoke_token(&self, token: &str) -> Result<(), AuthError>;

    /// Lifetime of newly issued credentials.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
///
/// Hashing is deliberately slow; implementations should keep it off the
/// async executor threads.
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    async fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Invalid credential lifetime: {0}")]
    InvalidLifetime(String),

    #[error("Credential store error: {0}")]
    Store(String),
}
