//! Identifier value objects.
//!
//! Identifiers are opaque, non-blank strings compared by value. Fresh ids are
//! UUIDv4 rendered in hyphenated form, which fits the `varchar(36)` columns.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier, rejecting empty or blank values.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_value(concat!($label, " cannot be empty")));
                }
                Ok(Self(value))
            }

            /// Allocate a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identity of a registered user.
    UserId,
    "UserId"
);

string_id!(
    /// Identity of a blog post.
    PostId,
    "PostId"
);

string_id!(
    /// Identity of a comment under a post.
    CommentId,
    "CommentId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_ids_are_rejected() {
        assert!(matches!(UserId::new(""), Err(DomainError::InvalidValue(_))));
        assert!(matches!(PostId::new("   "), Err(DomainError::InvalidValue(_))));
        let err = CommentId::new("\t").unwrap_err();
        assert_eq!(err.to_string(), "CommentId cannot be empty");
    }

    #[test]
    fn test_ids_compare_by_value() {
        let a = PostId::new("post-1").unwrap();
        let b = PostId::new("post-1".to_string()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, PostId::new("post-2").unwrap());
        assert_eq!(a.to_string(), "post-1");
    }

    #[test]
    fn test_generated_ids_are_distinct_uuids() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let id: UserId = serde_json::from_str("\"u-1\"").unwrap();
        assert_eq!(id.as_str(), "u-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"u-1\"");
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
