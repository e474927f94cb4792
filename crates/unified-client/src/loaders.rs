//! Page data loaders
//!
//! One load policy, generalized once and instantiated per page:
//!
//! 1. Obtain a credential from the [`Session`]; without one the request is
//!    never sent and the loader reports `NotAuthenticated`.
//! 2. Issue exactly one `GET` through the [`ApiClient`].
//! 3. Success returns the parsed payload verbatim.
//! 4. Any failure is reported as a typed [`LoadError`] — no retry, no
//!    partial result. A 401 additionally invalidates the session so the
//!    next load re-authenticates.
//!
//! The rendering layer collapses a failure to the view model's `Default`
//! (`Result::unwrap_or_default`), which keeps "not authenticated yet",
//! "request failed" and "nothing yet" visually identical.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;
use unified_types::{
    DashboardKpis, InboundShipment, Product, Revision, SalesOrder, StockRow, SyncStatus,
    WooConnection, WooSyncStatus,
};

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::session::Session;

/// Why a page load produced no data
#[derive(Debug, Error)]
pub enum LoadError {
    /// No credential was available; no data request was issued
    #[error("not authenticated")]
    NotAuthenticated,

    /// The data request was issued and failed
    #[error(transparent)]
    Request(#[from] ClientError),
}

/// Result type for page loads
pub type LoadResult<T> = Result<T, LoadError>;

impl ApiClient {
    async fn load<T: DeserializeOwned>(&self, session: &Session, path: &str) -> LoadResult<T> {
        let Some(token) = session.authenticate(self).await else {
            return Err(LoadError::NotAuthenticated);
        };
        match self.get(path, Some(token.as_str())).await {
            Ok(payload) => Ok(payload),
            Err(err) => {
                if err.is_unauthorized() {
                    session.invalidate().await;
                }
                warn!("load {path} failed: {err}");
                Err(err.into())
            }
        }
    }

    /// Headline KPIs for the operations dashboard
    pub async fn dashboard_kpis(&self, session: &Session) -> LoadResult<DashboardKpis> {
        self.load(session, "/api/v1/dashboard/kpis").await
    }

    /// Integration sync queue counters
    pub async fn sync_status(&self, session: &Session) -> LoadResult<SyncStatus> {
        self.load(session, "/api/v1/integration/sync-status").await
    }

    /// WooCommerce queue and webhook counters
    pub async fn woo_sync_status(&self, session: &Session) -> LoadResult<WooSyncStatus> {
        self.load(session, "/api/v1/integration/woo/sync-status").await
    }

    /// Configured WooCommerce store connections
    pub async fn woo_connections(&self, session: &Session) -> LoadResult<Vec<WooConnection>> {
        self.load(session, "/api/v1/integration/woo/connections").await
    }

    /// Stock rows by location and variant
    pub async fn stock(&self, session: &Session) -> LoadResult<Vec<StockRow>> {
        self.load(session, "/api/v1/inventory/stock").await
    }

    /// Product catalog, optionally filtered by SKU
    pub async fn products(&self, session: &Session, query: Option<&str>) -> LoadResult<Vec<Product>> {
        let path = match query {
            Some(sku) => format!("/api/v1/products?sku={}", urlencoding::encode(sku)),
            None => "/api/v1/products".to_string(),
        };
        self.load(session, &path).await
    }

    /// A single product by id
    pub async fn product(&self, session: &Session, id: i64) -> LoadResult<Product> {
        self.load(session, &format!("/api/v1/products/{id}")).await
    }

    /// Change history for an entity
    pub async fn revisions(&self, session: &Session, entity: &str, id: i64) -> LoadResult<Vec<Revision>> {
        self.load(session, &format!("/api/v1/revisions/{entity}/{id}")).await
    }

    /// Active and historical inbound shipments
    pub async fn inbound_shipments(&self, session: &Session) -> LoadResult<Vec<InboundShipment>> {
        self.load(session, "/api/v1/inbound-shipments").await
    }

    /// Sales orders across all channels
    pub async fn sales_orders(&self, session: &Session) -> LoadResult<Vec<SalesOrder>> {
        self.load(session, "/api/v1/sales/orders").await
    }
}

/// URL encode a query value (simple implementation)
mod urlencoding {
    pub fn encode(s: &str) -> String {
        let mut result = String::with_capacity(s.len() * 3);
        for c in s.chars() {
            match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
                ' ' => result.push_str("%20"),
                _ => {
                    for b in c.to_string().bytes() {
                        result.push_str(&format!("%{b:02X}"));
                    }
                }
            }
        }
        result
    }
}
