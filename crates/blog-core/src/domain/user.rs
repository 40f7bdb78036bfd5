use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Email, UserId, now, trimmed_len};
use crate::error::DomainError;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;

/// User entity - a registered account.
///
/// Immutable after creation. The password hash never appears in the
/// serialized projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: Email,
    username: String,
    #[serde(skip_serializing)]
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated id and the current timestamp.
    pub fn create(
        email: Email,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::restore(UserId::generate(), email, username, password_hash, now())
    }

    /// Rebuild a user from persisted fields, re-checking every invariant.
    pub fn restore(
        id: UserId,
        email: Email,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let user = Self {
            id,
            email,
            username: username.into(),
            password_hash: password_hash.into(),
            created_at,
        };
        user.validate()?;
        Ok(user)
    }

    fn validate(&self) -> Result<(), DomainError> {
        let len = trimmed_len(&self.username);
        if len < USERNAME_MIN {
            return Err(DomainError::validation(
                "Username must be at least 3 characters long",
            ));
        }
        if len > USERNAME_MAX {
            return Err(DomainError::validation(
                "Username must not exceed 50 characters",
            ));
        }
        if self.password_hash.is_empty() {
            return Err(DomainError::validation("Password hash is required"));
        }
        Ok(())
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
