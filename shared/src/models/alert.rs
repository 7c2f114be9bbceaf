//! Low-stock alert models and the severity derivation rule
//!
//! Severity, shortage, and recommended quantity are always derived from the
//! live stock level at read time. Only the workflow state (acknowledged,
//! snoozed, resolved) is persisted, so the two can never disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state of an alert record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
    Snoozed,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Snoozed => "snoozed",
        }
    }
}

/// Derived severity of a low-stock condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Low,
}

/// Persisted workflow state for one (product, warehouse) pair.
///
/// Identity is the pair; one record spans the lifecycle from first breach
/// through resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub status: AlertStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snoozed_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the derived active-alert projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertView {
    pub product_id: i64,
    pub warehouse_id: i64,
    pub product_name: String,
    pub warehouse_name: String,
    pub current_stock: i64,
    pub reorder_point: i64,
    /// `reorder_point - current_stock`; negative means overstock
    pub shortage: i64,
    pub severity: AlertSeverity,
    pub recommended_quantity: i64,
    pub status: AlertStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snoozed_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Derive the alert severity for a stock level, if any.
///
/// A pair is breached when stock is below the reorder point; the critical
/// tier starts at half the reorder point (integer arithmetic, so 1 unit
/// against a reorder point of 3 is critical).
pub fn evaluate_severity(reorder_point: i64, current_stock: i64) -> Option<AlertSeverity> {
    if reorder_point <= 0 || current_stock >= reorder_point {
        return None;
    }
    if current_stock * 2 <= reorder_point {
        Some(AlertSeverity::Critical)
    } else {
        Some(AlertSeverity::Low)
    }
}

/// Shortage relative to the reorder point; negative when overstocked.
pub fn shortage(reorder_point: i64, current_stock: i64) -> i64 {
    reorder_point - current_stock
}

/// Quantity needed to reach the safety-stock target of twice the reorder
/// point, floored at zero.
pub fn recommended_quantity(reorder_point: i64, current_stock: i64) -> i64 {
    (2 * reorder_point - current_stock).max(0)
}
