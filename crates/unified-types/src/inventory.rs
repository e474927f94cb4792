//! Inventory matrix view models

use serde::{Deserialize, Serialize};

/// Stock-by-location row from `GET /api/v1/inventory/stock`
///
/// Quantities arrive as decimal strings and are rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRow {
    pub id: i64,
    pub location_id: i64,
    pub variant_id: i64,
    pub on_hand_qty: String,
    pub reserved_qty: String,
    pub available_qty: String,
}
