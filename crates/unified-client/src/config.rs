//! Client configuration
//!
//! One environment-provided base URL covers both the REST endpoints and the
//! push channels; the push-channel address is derived by scheme
//! substitution.

use std::time::Duration;

/// Fallback API address for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable holding the backend base URL
pub const BASE_URL_ENV: &str = "UNIFIED_API_BASE_URL";

/// Backend connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP base URL, no trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Configuration for a specific backend address
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Read the base URL from `UNIFIED_API_BASE_URL` (via `.env` if present),
    /// falling back to [`DEFAULT_BASE_URL`]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Absolute URL for a REST path
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL for a push-channel path, with the HTTP scheme swapped
    /// to its WebSocket equivalent
    pub fn ws_url(&self, path: &str) -> String {
        let base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base_url.clone()
        };
        format!("{base}{path}")
    }
}
