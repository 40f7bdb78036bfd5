use std::sync::Arc;

use crate::domain::{Email, UserId};
use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService, TokenService};

/// The authenticated principal behind a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
    pub email: Email,
}

/// A freshly issued credential and its lifetime in seconds.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Credential hashing and authentication-context lifecycle.
///
/// The concrete hashing algorithm and token strategy are injected; the
/// service only translates their failures into domain errors.
#[derive(Clone)]
pub struct AuthService {
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(passwords: Arc<dyn PasswordService>, tokens: Arc<dyn TokenService>) -> Self {
        Self { passwords, tokens }
    }

    pub async fn hash_password(&self, plaintext: &str) -> Result<String, DomainError> {
        self.passwords
            .hash(plaintext)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Returns `false` on mismatch and on an unreadable stored hash.
    pub async fn verify_password(&self, plaintext: &str, hash: &str) -> bool {
        self.passwords.verify(plaintext, hash).await.unwrap_or(false)
    }

    pub async fn issue_token(
        &self,
        user_id: &UserId,
        email: &Email,
    ) -> Result<IssuedToken, DomainError> {
        let token = self
            .tokens
            .generate_token(user_id, email)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }

    pub async fn verify_token(&self, token: &str) -> Result<AuthContext, DomainError> {
        match self.tokens.validate_token(token).await {
            Ok(claims) => Ok(AuthContext {
                user_id: claims.user_id,
                email: claims.email,
            }),
            Err(AuthError::Store(msg)) => Err(DomainError::Internal(msg)),
            Err(AuthError::TokenExpired) => {
                Err(DomainError::authentication("Authentication token has expired"))
            }
            Err(_) => Err(DomainError::authentication("Invalid or expired token")),
        }
    }

    pub async fn revoke_token(&self, token: &str) -> Result<(), DomainError> {
        self.tokens
            .revoke_token(token)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}
