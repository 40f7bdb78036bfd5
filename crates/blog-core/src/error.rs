//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// Every variant is a recoverable, request-scoped failure. The HTTP boundary
/// dispatches on [`DomainError::kind`] rather than on the variant itself.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{entity_type} with this {field} already exists")]
    Duplicate {
        entity_type: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Discriminator for [`DomainError`], used for status-code lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    InvalidValue,
    NotFound,
    Unauthorized,
    Authentication,
    Duplicate,
    Internal,
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidValue(_) => ErrorKind::InvalidValue,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::Repository(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
