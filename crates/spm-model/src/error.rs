//! Error taxonomy shared by every step of the mapping workflow.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the SmartPayMap client.
///
/// The taxonomy is intentionally flat: a step catches the error, renders it
/// next to the control that triggered it, and waits for the user to retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpmError {
    /// The request never reached the backend or no response came back.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// The backend answered 2xx but the body is missing required fields.
    #[error("unexpected response from {endpoint}: {message}")]
    ResponseShape {
        /// Endpoint path that produced the body.
        endpoint: String,
        /// What was wrong with the body.
        message: String,
    },

    /// A client-side precondition was not met.
    #[error("{0}")]
    Validation(String),

    /// Local file access failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be loaded or are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SpmError {
    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a response-shape error on `endpoint`.
    pub fn shape(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResponseShape {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Returns a short, generic message suitable for a status line.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Network error. Please check your connection.",
            Self::Http { status, .. } if *status >= 500 => "Server error. Please try again later.",
            Self::Http { status: 404, .. } => "The requested resource was not found.",
            Self::Http { status: 401 | 403, .. } => {
                "You are not authorized to perform this action."
            }
            Self::Http { .. } | Self::Validation(_) => "Please check your input and try again.",
            Self::ResponseShape { .. } => "Invalid response format from server.",
            Self::Io { .. } => "The file could not be read.",
            Self::Config(_) => "The client configuration is invalid.",
        }
    }

    /// Returns whether re-running the same action may succeed without changes.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, SpmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = SpmError::Network("connection refused".to_string());
        assert!(err.user_message().contains("connection"));

        let err = SpmError::Http {
            status: 503,
            message: "upstream down".to_string(),
        };
        assert!(err.user_message().contains("Server error"));

        let err = SpmError::shape("/upload", "missing field `rows`");
        assert!(err.user_message().contains("response format"));
    }

    #[test]
    fn test_retryable() {
        assert!(SpmError::Network("timeout".to_string()).is_retryable());
        assert!(
            SpmError::Http {
                status: 502,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !SpmError::Http {
                status: 422,
                message: "bad".to_string()
            }
            .is_retryable()
        );
        assert!(!SpmError::validation("Please select a target country").is_retryable());
    }

    #[test]
    fn test_display_keeps_backend_message() {
        let err = SpmError::Http {
            status: 422,
            message: "Only CSV files are allowed".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 422: Only CSV files are allowed");
    }
}
