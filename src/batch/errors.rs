//! Batch error types
//!
//! Every variant names the metric entry that aborted the batch.

use thiserror::Error;

use crate::cellset::DecodeError;
use crate::transport::TransportError;

/// Result type for batch runs
pub type BatchResult<T> = Result<T, BatchError>;

#[derive(Debug, Error)]
pub enum BatchError {
    /// Batch configuration missing or unreadable
    #[error("Batch config error: {0}")]
    Config(String),

    /// Config lists no metrics
    #[error("No metrics defined in config")]
    NoMetrics,

    /// A generated payload failed validation
    #[error("Payload for '{metric}' is invalid: {}", .errors.join("; "))]
    InvalidPayload { metric: String, errors: Vec<String> },

    /// Sending a query failed
    #[error("Error querying {metric}: {source}")]
    Transport {
        metric: String,
        #[source]
        source: TransportError,
    },

    /// Decoding a response failed
    #[error("Error decoding {metric}: {source}")]
    Decode {
        metric: String,
        #[source]
        source: DecodeError,
    },

    /// Every query succeeded but none returned rows
    #[error("No data returned from any query")]
    NoData,
}

impl BatchError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            BatchError::Config(_) => "CELLQ_BATCH_CONFIG",
            BatchError::NoMetrics => "CELLQ_BATCH_NO_METRICS",
            BatchError::InvalidPayload { .. } => "CELLQ_BATCH_INVALID_PAYLOAD",
            BatchError::Transport { source, .. } => source.code(),
            BatchError::Decode { source, .. } => source.code(),
            BatchError::NoData => "CELLQ_BATCH_NO_DATA",
        }
    }

    /// Metric entry that caused the failure, if any
    pub fn metric(&self) -> Option<&str> {
        match self {
            BatchError::InvalidPayload { metric, .. }
            | BatchError::Transport { metric, .. }
            | BatchError::Decode { metric, .. } => Some(metric),
            _ => None,
        }
    }
}
