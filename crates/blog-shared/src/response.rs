//! Standardized API response types.

use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
///
/// The status code travels in the HTTP response line; the body carries the
/// human-readable message and, when known, the request id for log lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// A human-readable explanation of this failure.
    pub error: String,

    /// Request ID for debugging purposes.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new("Authentication required")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

/// Body carrying only a confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Post with id x not found")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Post with id x not found"}));

        let body =
            serde_json::to_value(ErrorResponse::internal_error().with_request_id("req-1")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "Internal server error", "requestId": "req-1"})
        );
    }
}
