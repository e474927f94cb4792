//! Product catalog (PIM) view models

use serde::{Deserialize, Serialize};

/// Catalog row from `GET /api/v1/products` and `GET /api/v1/products/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub ean: Option<String>,
    pub status: String,
    pub product_type: String,
    pub is_tobacco: bool,
}

/// Change-history row from `GET /api/v1/revisions/{entity}/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub id: i64,
    pub revision_no: u32,
    pub changed_at: String,
}
