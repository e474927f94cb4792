//! Unified Client - data access for the Unified ERP dashboard
//!
//! This crate is the contract between the dashboard pages and the backend
//! API: how pages obtain authoritative data, how partial or failed calls
//! are reflected, and how the demo credential is held.
//!
//! # Quick Start
//!
//! ```ignore
//! use unified_client::{ApiClient, ClientConfig, Session};
//!
//! let client = ApiClient::new(ClientConfig::from_env())?;
//! let session = Session::new();
//!
//! // Best-effort login; loaders retry on their own if this fails.
//! session.authenticate(&client).await;
//!
//! let kpis = client.dashboard_kpis(&session).await.unwrap_or_default();
//! println!("{} products", kpis.products_total);
//! ```
//!
//! # Failure policy
//!
//! Loaders never surface partial data. Every loader returns a typed
//! [`LoadResult`]; the rendering layer collapses a failure to the view
//! model's `Default` (`Result::unwrap_or_default`), so presentation code
//! stays free of error branching while callers that care can still see
//! what went wrong.

pub mod config;
pub mod error;
pub mod http;
pub mod loaders;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use loaders::{LoadError, LoadResult};
pub use session::Session;
