//! Authenticated Transport
//!
//! The decoder and batch runner only see `QueryTransport`: one call that
//! sends a payload and returns the raw JSON response. Credentials, the
//! token exchange and HTTP details stay behind it.

mod config;
mod errors;
mod http;

use serde_json::Value;

pub use config::{ApiConfig, ENV_VARS};
pub use errors::{TransportError, TransportResult};
pub use http::{parse_token, HttpTransport};

/// Sends aggregate query payloads to the API
pub trait QueryTransport {
    /// Posts one payload and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Non-2xx responses surface as `TransportError::Http` carrying the
    /// status code and response body.
    fn post_query(&self, payload: &Value) -> TransportResult<Value>;
}

impl<T: QueryTransport + ?Sized> QueryTransport for &T {
    fn post_query(&self, payload: &Value) -> TransportResult<Value> {
        (**self).post_query(payload)
    }
}
