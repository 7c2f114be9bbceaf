//! Audit trail models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of stock-affecting event recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockEventType {
    TransferOut,
    TransferIn,
    PurchaseReceived,
    Adjustment,
}

impl StockEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockEventType::TransferOut => "transfer_out",
            StockEventType::TransferIn => "transfer_in",
            StockEventType::PurchaseReceived => "purchase_received",
            StockEventType::Adjustment => "adjustment",
        }
    }
}

/// Append-only record of one quantity change in the stock ledger.
///
/// `quantity_before`/`quantity_after` are what the mutating operation
/// observed, never recomputed after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub event_type: StockEventType,
    pub reference_number: String,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity_change: i64,
    pub quantity_before: i64,
    pub quantity_after: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
