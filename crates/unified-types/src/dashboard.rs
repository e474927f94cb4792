//! Operations dashboard view models
//!
//! The landing page renders two independent models: headline KPIs and the
//! third-party integration sync counters. Both fall back to their `Default`
//! (all zeros, no error text) when the load fails.

use serde::{Deserialize, Serialize};

/// Headline KPIs from `GET /api/v1/dashboard/kpis`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardKpis {
    pub products_total: u64,
    pub variants_total: u64,
    pub suppliers_total: u64,
    pub purchase_orders_open: u64,
    pub inbound_shipments_active: u64,
    pub low_stock_alerts_open: u64,
    /// Stock valuation under FIFO, in the store currency
    pub stock_value_fifo: f64,
    /// Stock valuation under weighted average cost, in the store currency
    pub stock_value_wac: f64,
}

/// Integration queue counters from `GET /api/v1/integration/sync-status`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncStatus {
    pub pending: u64,
    pub processed: u64,
    pub failed: u64,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kpis_are_all_zero() {
        let kpis = DashboardKpis::default();
        assert_eq!(kpis.products_total, 0);
        assert_eq!(kpis.low_stock_alerts_open, 0);
        assert_eq!(kpis.stock_value_fifo, 0.0);
        assert_eq!(kpis.stock_value_wac, 0.0);
    }

    #[test]
    fn test_sync_status_default_has_no_error() {
        let status = SyncStatus::default();
        assert_eq!(status.pending, 0);
        assert_eq!(status.last_error, None);
    }

    #[test]
    fn test_kpis_deserialize_backend_payload() {
        let json = r#"{
            "products_total": 42,
            "variants_total": 120,
            "suppliers_total": 7,
            "purchase_orders_open": 3,
            "inbound_shipments_active": 2,
            "low_stock_alerts_open": 5,
            "stock_value_fifo": 10234.5,
            "stock_value_wac": 10180.25
        }"#;
        let kpis: DashboardKpis = serde_json::from_str(json).unwrap();
        assert_eq!(kpis.products_total, 42);
        assert_eq!(kpis.stock_value_wac, 10180.25);
    }
}
