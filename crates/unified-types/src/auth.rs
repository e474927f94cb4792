//! Demo authentication payloads
//!
//! The dashboard authenticates once per session with fixed demo
//! credentials; these are the only two auth shapes it exchanges.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response carrying the opaque bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}
