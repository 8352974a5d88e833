//! API connection settings
//!
//! Settings are always passed explicitly to the transport. The helpers here
//! read them from a JSON file or from the process environment; only the
//! command line calls them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{TransportError, TransportResult};

/// Environment variables read by `ApiConfig::from_env`, in field order
pub const ENV_VARS: [&str; 5] = [
    "VISIER_HOST",
    "VISIER_APIKEY",
    "VISIER_VANITY",
    "VISIER_USERNAME",
    "VISIER_PASSWORD",
];

/// Connection settings for the aggregate API
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://tenant.api.example.com`
    pub host: String,
    pub apikey: String,
    pub vanity: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("apikey", &mask(&self.apikey))
            .field("vanity", &self.vanity)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Keeps the last four characters of a secret
fn mask(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("***{}", tail)
}

impl ApiConfig {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> TransportResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TransportError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        let config: ApiConfig = serde_json::from_str(&content)
            .map_err(|e| TransportError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Read settings from `VISIER_*` environment variables.
    ///
    /// All missing variables are reported together.
    pub fn from_env() -> TransportResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any name → value lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TransportResult<Self> {
        let mut values = Vec::with_capacity(ENV_VARS.len());
        let mut missing = Vec::new();

        for name in ENV_VARS {
            match lookup(name).filter(|v| !v.trim().is_empty()) {
                Some(value) => values.push(value),
                None => {
                    missing.push(name);
                    values.push(String::new());
                }
            }
        }

        if !missing.is_empty() {
            return Err(TransportError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or_default();
        Ok(Self {
            host: next(),
            apikey: next(),
            vanity: next(),
            username: next(),
            password: next(),
        })
    }

    fn validate(&self) -> TransportResult<()> {
        if self.host.trim().is_empty() {
            return Err(TransportError::Config("host must not be empty".into()));
        }
        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(TransportError::Config(format!(
                "host must be an http(s) URL, got '{}'",
                self.host
            )));
        }
        if self.username.is_empty() || self.password.is_empty() {
            return Err(TransportError::Config(
                "username and password are required".into(),
            ));
        }
        Ok(())
    }

    /// Host without trailing slashes
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }
}
