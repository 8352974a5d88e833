//! Observable events
//!
//! Only the outer layers (transport, batch, CLI) emit events. Validation
//! and decoding are pure and never log.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    ConfigLoaded,

    // Payloads
    PayloadLoaded,
    PayloadValidated,
    PayloadRejected,

    // Transport
    TokenRequested,
    TokenAcquired,
    QueryDispatched,
    QueryFailed,

    // Decoding
    ResponseDecoded,
    ResponseRejected,

    // Batch
    BatchBegin,
    BatchEntryEmpty,
    BatchComplete,
    BatchAborted,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::PayloadLoaded => "PAYLOAD_LOADED",
            Event::PayloadValidated => "PAYLOAD_VALIDATED",
            Event::PayloadRejected => "PAYLOAD_REJECTED",
            Event::TokenRequested => "TOKEN_REQUESTED",
            Event::TokenAcquired => "TOKEN_ACQUIRED",
            Event::QueryDispatched => "QUERY_DISPATCHED",
            Event::QueryFailed => "QUERY_FAILED",
            Event::ResponseDecoded => "RESPONSE_DECODED",
            Event::ResponseRejected => "RESPONSE_REJECTED",
            Event::BatchBegin => "BATCH_BEGIN",
            Event::BatchEntryEmpty => "BATCH_ENTRY_EMPTY",
            Event::BatchComplete => "BATCH_COMPLETE",
            Event::BatchAborted => "BATCH_ABORTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::PayloadRejected
            | Event::QueryFailed
            | Event::ResponseRejected
            | Event::BatchAborted => Severity::Error,
            Event::BatchEntryEmpty => Severity::Warn,
            Event::TokenRequested => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
