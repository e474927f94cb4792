//! Demo session credential
//!
//! An app-scoped context object holding the opaque bearer token. The owner
//! constructs one at startup and passes it by reference into every loader;
//! there is no process-wide singleton. The slot only ever moves empty →
//! value on a successful login and value → empty through [`Session::invalidate`],
//! so concurrent readers never observe a torn credential.

use tokio::sync::RwLock;
use tracing::{debug, warn};
use unified_types::{LoginRequest, LoginResponse};

use crate::http::ApiClient;

/// Fixed demo login used by the dashboard
pub const DEMO_EMAIL: &str = "admin@unified.local";
pub const DEMO_PASSWORD: &str = "admin123";

const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Credential context for the running dashboard instance
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    /// Fresh session with no credential
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, or log in with the demo credentials.
    ///
    /// On any login failure (transport error or non-2xx) this returns
    /// `None` and caches nothing, so every subsequent call retries until
    /// one succeeds. While a token is cached no network call is made.
    pub async fn authenticate(&self, client: &ApiClient) -> Option<String> {
        if let Some(token) = self.token.read().await.clone() {
            return Some(token);
        }

        let request = LoginRequest {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        };
        match client.post::<LoginResponse, _>(LOGIN_PATH, &request, None).await {
            Ok(response) => {
                let mut slot = self.token.write().await;
                // A concurrent login may have won the race; keep its token.
                let token = slot.get_or_insert(response.access_token).clone();
                debug!("demo session established");
                Some(token)
            }
            Err(err) => {
                warn!("demo login failed: {err}");
                None
            }
        }
    }

    /// Current token, without triggering a login
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Drop the credential. The next [`Session::authenticate`] logs in again.
    pub async fn invalidate(&self) {
        debug!("session invalidated");
        *self.token.write().await = None;
    }
}
