//! CLI-specific error types
//!
//! Errors from the library layers keep their own stable codes.

use std::fmt;
use std::io;

use crate::batch::BatchError;
use crate::cellset::DecodeError;
use crate::payload::PayloadError;
use crate::transport::TransportError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// I/O error (files, stdout)
    IoError,
    /// Payload failed validation
    InvalidPayload,
    /// Error raised by a library layer, carrying that layer's code
    Upstream(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError => "CELLQ_CLI_IO_ERROR",
            Self::InvalidPayload => "CELLQ_PAYLOAD_INVALID",
            Self::Upstream(code) => code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Validation failure listing every defect
    pub fn invalid_payload(errors: &[String]) -> Self {
        Self::new(CliErrorCode::InvalidPayload, errors.join("; "))
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    fn upstream(code: &'static str, message: impl fmt::Display) -> Self {
        Self::new(CliErrorCode::Upstream(code), message.to_string())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<PayloadError> for CliError {
    fn from(e: PayloadError) -> Self {
        Self::upstream(e.code(), e)
    }
}

impl From<TransportError> for CliError {
    fn from(e: TransportError) -> Self {
        Self::upstream(e.code(), e)
    }
}

impl From<DecodeError> for CliError {
    fn from(e: DecodeError) -> Self {
        Self::upstream(e.code(), e)
    }
}

impl From<BatchError> for CliError {
    fn from(e: BatchError) -> Self {
        Self::upstream(e.code(), e)
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_code_is_preserved() {
        let err: CliError = DecodeError::malformed("coordinate out of range").into();
        assert_eq!(err.code_str(), "CELLQ_MALFORMED_RESPONSE");
        assert!(err.message().contains("coordinate out of range"));
    }

    #[test]
    fn test_invalid_payload_joins_errors() {
        let err = CliError::invalid_payload(&["a".into(), "b".into()]);
        assert_eq!(err.code(), &CliErrorCode::InvalidPayload);
        assert_eq!(err.to_string(), "CELLQ_PAYLOAD_INVALID: a; b");
    }
}
