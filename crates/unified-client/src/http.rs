//! Authenticated HTTP data client
//!
//! Thin wrapper over a shared `reqwest::Client`. Every call is a fresh
//! fetch (`Cache-Control: no-store`); a bearer header is attached only when
//! the caller supplies a token, and unauthenticated requests pass through
//! for the backend to reject. Response bodies are parsed as the declared
//! shape with no further validation.

use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP data client for the backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client with the configured request timeout
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Connection settings this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET` a REST path and parse the response as `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T> {
        let url = self.config.api_url(path);
        debug!("GET {url}");
        let mut request = self.http.get(&url).header(CACHE_CONTROL, "no-store");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::parse_json(request.send().await?).await
    }

    /// `POST` a JSON body to a REST path and parse the response as `T`
    pub async fn post<T, B>(&self, path: &str, body: &B, token: Option<&str>) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.api_url(path);
        debug!("POST {url}");
        let mut request = self
            .http
            .post(&url)
            .header(CACHE_CONTROL, "no-store")
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::parse_json(request.send().await?).await
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }
}
