//! Sales order view models

use serde::{Deserialize, Serialize};

/// Order row from `GET /api/v1/sales/orders`
///
/// `total` is a decimal string, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: i64,
    pub order_number: String,
    pub channel_type: String,
    pub status: String,
    pub total: String,
    pub customer_id: Option<i64>,
}
