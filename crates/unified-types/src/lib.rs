//! Unified Types - View models for the Unified ERP dashboard
//!
//! This crate contains the wire shapes the dashboard pages render, exactly
//! as the backend serializes them. It has zero dependencies on other
//! unified crates and covers:
//!
//! - Demo authentication payloads (login request/response)
//! - Dashboard KPIs and integration sync counters
//! - Product catalog rows and revision history
//! - Inventory stock rows
//! - Inbound shipments and sales orders
//! - WooCommerce sync status and store connections
//!
//! # Invariants
//!
//! Every view model is always fully populated: a page holds either the real
//! backend payload or the type's `Default`, never a mixture. `Default` is
//! therefore part of the contract — it is the exact zero/empty shape a page
//! falls back to when a load fails.
//!
//! Quantities and money totals that the backend serializes as decimal
//! strings stay `String` here; the client renders them verbatim and does no
//! numeric validation.

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod pim;
pub mod sales;
pub mod supply;
pub mod woo;

pub use auth::*;
pub use dashboard::*;
pub use inventory::*;
pub use pim::*;
pub use sales::*;
pub use supply::*;
pub use woo::*;

/// Version of the unified view-model schema
pub const TYPES_VERSION: &str = "0.1.0";
