//! # Transport Errors

use thiserror::Error;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// API configuration missing or unreadable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token exchange failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Non-2xx response
    #[error("API Error {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection, TLS or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx response whose body is not JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

impl TransportError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TransportError::Config(_) => "CELLQ_TRANSPORT_CONFIG",
            TransportError::Auth(_) => "CELLQ_TRANSPORT_AUTH",
            TransportError::Http { .. } => "CELLQ_TRANSPORT_HTTP",
            TransportError::Network(_) => "CELLQ_TRANSPORT_NETWORK",
            TransportError::InvalidBody(_) => "CELLQ_TRANSPORT_BODY",
        }
    }

    /// HTTP status, when the failure was an HTTP response
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => TransportError::Network(err.to_string()),
        }
    }
}
