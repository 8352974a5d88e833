//! Blocking HTTP transport with the two-step token exchange
//!
//! ```text
//! 1. POST {host}/v1/admin/visierSecureToken?vanity=..   form: username, password
//!    -> session token (JSON {"asid": ..}, JSON string, or plain text)
//! 2. POST {host}/v1/data/query/aggregate?vanity=..      body: payload
//!    Cookie: VisierASIDToken=<token>
//! ```
//!
//! Both requests carry the `apikey` header. The token is fetched once per
//! transport and reused for every query.

use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, COOKIE};
use serde_json::Value;

use crate::observability::{log_event, Event};

use super::config::ApiConfig;
use super::errors::{TransportError, TransportResult};
use super::QueryTransport;

const TOKEN_PATH: &str = "/v1/admin/visierSecureToken";
const AGGREGATE_PATH: &str = "/v1/data/query/aggregate";
const TOKEN_COOKIE: &str = "VisierASIDToken";

pub struct HttpTransport {
    config: ApiConfig,
    client: Client,
    token: Mutex<Option<String>>,
}

impl HttpTransport {
    /// Creates a transport; no request is made until the first query.
    pub fn new(config: ApiConfig) -> TransportResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("cellquery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            config,
            client,
            token: Mutex::new(None),
        })
    }

    /// Uses an already issued session token instead of exchanging credentials
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Mutex::new(Some(token.into()));
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    fn token(&self) -> TransportResult<String> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_| TransportError::Auth("token cache poisoned".into()))?;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let token = self.exchange_credentials()?;
        *slot = Some(token.clone());
        Ok(token)
    }

    fn exchange_credentials(&self) -> TransportResult<String> {
        log_event(Event::TokenRequested, &[("username", self.config.username.as_str())]);

        let response = self
            .client
            .post(self.url(TOKEN_PATH))
            .header(ACCEPT, "application/json")
            .header("apikey", &self.config.apikey)
            .query(&[("vanity", &self.config.vanity)])
            .form(&[
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
            ])
            .send()
            .map_err(|e| TransportError::Auth(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TransportError::Auth(e.to_string()))?;
        if !status.is_success() {
            return Err(TransportError::Auth(format!("status {}: {}", status.as_u16(), body)));
        }

        let token = parse_token(&body);
        if token.is_empty() {
            return Err(TransportError::Auth("empty token in response".into()));
        }

        log_event(Event::TokenAcquired, &[]);
        Ok(token)
    }
}

impl QueryTransport for HttpTransport {
    fn post_query(&self, payload: &Value) -> TransportResult<Value> {
        let token = self.token()?;

        let response = self
            .client
            .post(self.url(AGGREGATE_PATH))
            .header(ACCEPT, "application/json")
            .header("apikey", &self.config.apikey)
            .header(COOKIE, format!("{}={}", TOKEN_COOKIE, token))
            .query(&[("vanity", &self.config.vanity)])
            .json(payload)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidBody(e.to_string()))
    }
}

/// Extracts the session token from a token-exchange response body.
///
/// Accepts `{"asid": "..."}`, a JSON string, or plain text; surrounding
/// quotes and whitespace are stripped.
pub fn parse_token(body: &str) -> String {
    let raw = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(obj)) => match obj.get("asid") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => Value::Object(obj).to_string(),
        },
        Ok(Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => body.to_string(),
    };
    raw.trim().trim_matches('"').trim_matches('\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_from_object() {
        assert_eq!(parse_token(r#"{"asid": "abc123"}"#), "abc123");
    }

    #[test]
    fn test_parse_token_from_json_string() {
        assert_eq!(parse_token(r#""abc123""#), "abc123");
    }

    #[test]
    fn test_parse_token_from_plain_text() {
        assert_eq!(parse_token("  abc123\n"), "abc123");
        assert_eq!(parse_token("'abc123'"), "abc123");
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport = HttpTransport::new(ApiConfig {
            host: "https://acme.example.com/".into(),
            apikey: "k".into(),
            vanity: "acme".into(),
            username: "u".into(),
            password: "p".into(),
        })
        .unwrap();
        assert_eq!(
            transport.url(AGGREGATE_PATH),
            "https://acme.example.com/v1/data/query/aggregate"
        );
    }

    #[test]
    fn test_with_token_skips_exchange() {
        let transport = HttpTransport::new(ApiConfig {
            host: "https://acme.example.com".into(),
            apikey: "k".into(),
            vanity: "acme".into(),
            username: "u".into(),
            password: "p".into(),
        })
        .unwrap()
        .with_token("preissued");
        assert_eq!(transport.token().unwrap(), "preissued");
    }
}
