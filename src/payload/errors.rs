//! Payload error types
//!
//! Schema defects found by the validator are not errors in this sense:
//! they are accumulated as strings in a `ValidationReport`. `PayloadError`
//! covers loading a payload and building one from typed parts.

use thiserror::Error;

/// Result type for payload operations
pub type PayloadResult<T> = Result<T, PayloadError>;

#[derive(Debug, Error)]
pub enum PayloadError {
    /// Payload file does not exist
    #[error("Payload file not found: {0}")]
    NotFound(String),

    /// Payload file exists but could not be read
    #[error("Failed to read payload '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Payload text is not valid JSON
    #[error("Invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Builder was asked for a query without a grouping axis
    #[error("Aggregate queries require at least one axis (dimension)")]
    NoAxes,

    /// Builder was given a multi-metric source with no columns
    #[error("Multi-metric source requires at least one metric column")]
    NoMetricColumns,
}

impl PayloadError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PayloadError::NotFound(_) => "CELLQ_PAYLOAD_NOT_FOUND",
            PayloadError::Io { .. } => "CELLQ_PAYLOAD_IO",
            PayloadError::Json(_) => "CELLQ_PAYLOAD_JSON",
            PayloadError::NoAxes => "CELLQ_PAYLOAD_NO_AXES",
            PayloadError::NoMetricColumns => "CELLQ_PAYLOAD_NO_METRICS",
        }
    }
}
