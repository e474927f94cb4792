//! Client error types
//!
//! Both variants are fatal to the call that produced them; the page-loader
//! layer decides what a failure means for the page.

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors from talking to the backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend answered with a non-success status
    #[error("HTTP {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        /// Raw response body text
        body: String,
    },

    /// Network-level failure: DNS, connection refused, timeout, or a body
    /// that did not match the declared shape
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// True when the backend rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ClientError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: boom");
    }

    #[test]
    fn test_is_unauthorized() {
        let err = ClientError::Http {
            status: 401,
            status_text: "Unauthorized".to_string(),
            body: String::new(),
        };
        assert!(err.is_unauthorized());

        let err = ClientError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: String::new(),
        };
        assert!(!err.is_unauthorized());
    }
}
