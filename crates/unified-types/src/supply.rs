//! Receiving / inbound supply view models

use serde::{Deserialize, Serialize};

/// Inbound shipment row from `GET /api/v1/inbound-shipments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundShipment {
    pub id: i64,
    pub supplier_id: i64,
    pub source_type: String,
    pub status: String,
}
