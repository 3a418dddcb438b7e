//! Unified error handling for the API client layer.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the store backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport failure before a response was received.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request was aborted after exceeding its deadline.
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Backend-provided message, or a templated status message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A request path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading a local file for upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation is not offered by this form or resource.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl ApiError {
    /// Build a request error from a status and an optional raw body.
    ///
    /// Prefers the backend's `message` (or `error`) field; otherwise falls
    /// back to `"Request failed with status {code}"`.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = backend_message(body)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Self::Request { status, message }
    }

    /// HTTP status, when the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Text suitable for an error toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { message, .. } => message.clone(),
            Self::Transport(e) if e.is_connect() => "Could not reach the server".to_string(),
            Self::Transport(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extract a human message from a JSON error body.
fn backend_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_backend_message() {
        let err = ApiError::from_status(400, r#"{"message":"Coupon code already exists"}"#);
        assert_eq!(err.to_string(), "Coupon code already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_from_status_falls_back_to_error_field() {
        let err = ApiError::from_status(422, r#"{"error":"value is required"}"#);
        assert_eq!(err.user_message(), "value is required");
    }

    #[test]
    fn test_from_status_templated_when_body_unstructured() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_from_status_templated_when_message_blank() {
        let err = ApiError::from_status(500, r#"{"message":"   "}"#);
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(ApiError::from_status(403, "").is_unauthorized());
        assert!(!ApiError::from_status(404, "").is_unauthorized());
        assert!(!ApiError::Timeout(5).is_unauthorized());
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(ApiError::Timeout(1).user_message(), "Request timed out after 1s");
        assert_eq!(ApiError::Timeout(120).to_string(), "Request timed out after 120s");
    }
}
