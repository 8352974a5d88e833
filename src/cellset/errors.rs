//! Decoder error types
//!
//! Error codes:
//! - CELLQ_RESPONSE_ERROR: the API reported a logical failure in the body
//! - CELLQ_MALFORMED_RESPONSE: the cell set is structurally corrupt
//!
//! Unparsable `value`/`support` scalars are not errors; they decode to null.

use serde_json::Value;
use thiserror::Error;

/// Result type for decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The response body carries an `error` object
    #[error("Query failed: {message}{}", code_suffix(.code))]
    Response {
        message: String,
        code: Option<String>,
    },

    /// Structural corruption, e.g. coordinate count differs from axis count
    #[error("Malformed cell set: {0}")]
    MalformedResponse(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_ref()
        .map(|c| format!(" (Code: {})", c))
        .unwrap_or_default()
}

impl DecodeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DecodeError::MalformedResponse(reason.into())
    }

    /// Builds a response error from the body's `error` member.
    ///
    /// The member is usually `{"message": ..., "errorCode": ...}`; a bare
    /// string is taken as the message.
    pub fn from_error_body(error: &Value) -> Self {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string(),
        };
        let code = error.get("errorCode").and_then(|c| match c {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });
        DecodeError::Response { message, code }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Response { .. } => "CELLQ_RESPONSE_ERROR",
            DecodeError::MalformedResponse(_) => "CELLQ_MALFORMED_RESPONSE",
        }
    }
}
