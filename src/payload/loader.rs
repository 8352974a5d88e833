//! Payload file loading
//!
//! Payload files either hold the payload at the root, or nest it under a
//! `payload` key next to descriptive metadata:
//!
//! ```json
//! { "description": "...", "payload": { "query": { ... } } }
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::errors::{PayloadError, PayloadResult};

/// Loads a raw payload from a JSON file.
///
/// The result is not validated; pass it to `PayloadValidator`.
pub fn load_payload(path: impl AsRef<Path>) -> PayloadResult<Value> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PayloadError::NotFound(path.display().to_string()));
    }

    let text = fs::read_to_string(path).map_err(|source| PayloadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_payload(&text)
}

/// Parses a raw payload from JSON text, unwrapping a `payload` envelope.
pub fn parse_payload(text: &str) -> PayloadResult<Value> {
    let document: Value = serde_json::from_str(text)?;
    Ok(unwrap_envelope(document))
}

fn unwrap_envelope(mut document: Value) -> Value {
    match document.get_mut("payload") {
        Some(inner) => inner.take(),
        None => document,
    }
}
