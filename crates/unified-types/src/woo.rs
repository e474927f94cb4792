//! WooCommerce integration view models

use serde::{Deserialize, Serialize};

/// Queue and webhook counters from `GET /api/v1/integration/woo/sync-status`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WooSyncStatus {
    pub queue_pending: u64,
    pub queue_failed: u64,
    pub queue_done: u64,
    pub webhooks_pending: u64,
    pub webhooks_processed: u64,
}

/// Store connection row from `GET /api/v1/integration/woo/connections`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WooConnection {
    pub id: i64,
    pub store_channel_id: i64,
    pub provider: String,
    pub api_base_url: String,
    pub active: bool,
}
