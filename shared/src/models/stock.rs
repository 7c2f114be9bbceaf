//! Stock ledger models

use serde::{Deserialize, Serialize};

/// Stock on hand for one (product, warehouse) pair.
///
/// At most one entry exists per pair; entries are created implicitly on the
/// first arrival of stock at a warehouse. Quantity never goes below zero —
/// mutations that would underflow fail without touching the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i64,
}
