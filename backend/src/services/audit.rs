//! Audit trail service
//!
//! Every quantity change in the stock ledger lands here. The log is
//! append-only: entries are never mutated or deleted once written.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use shared::models::{AuditLogEntry, StockEventType};

use crate::error::AppResult;
use crate::store::{collections, next_id, JsonStore};

/// Audit service for recording and querying stock changes
#[derive(Clone)]
pub struct AuditService {
    store: JsonStore,
}

/// One pending audit record, supplied by the mutating operation.
///
/// `quantity_before`/`quantity_after` come from the caller's own
/// read-modify-write cycle; recomputing them here would open a race between
/// the ledger mutation and the audit write.
#[derive(Debug, Clone)]
pub struct StockChange {
    pub event_type: StockEventType,
    pub reference_number: String,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity_change: i64,
    pub quantity_before: i64,
    pub quantity_after: i64,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Filters for querying the audit log (AND semantics)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogFilter {
    pub product_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub event_type: Option<StockEventType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl AuditService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Append a batch of stock changes in one write.
    ///
    /// The batch shares a single `next_id` computation and a single write so
    /// a multi-entry operation (both sides of a transfer) can never be torn
    /// across audit-log writes. An empty batch is a no-op.
    pub async fn log_stock_changes(
        &self,
        changes: Vec<StockChange>,
    ) -> AppResult<Vec<AuditLogEntry>> {
        if changes.is_empty() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<AuditLogEntry> =
            self.store.read_collection(collections::AUDIT_LOG).await?;
        let base_id = next_id(entries.iter().map(|entry| entry.id));

        let created: Vec<AuditLogEntry> = changes
            .into_iter()
            .enumerate()
            .map(|(offset, change)| AuditLogEntry {
                id: base_id + offset as i64,
                event_type: change.event_type,
                reference_number: change.reference_number,
                product_id: change.product_id,
                warehouse_id: change.warehouse_id,
                quantity_change: change.quantity_change,
                quantity_before: change.quantity_before,
                quantity_after: change.quantity_after,
                timestamp: change.timestamp,
                notes: change.notes,
            })
            .collect();

        entries.extend(created.iter().cloned());
        self.store
            .write_collection(collections::AUDIT_LOG, &entries)
            .await?;

        Ok(created)
    }

    /// Query the audit log, newest first. All provided filters must match.
    pub async fn query(&self, filter: AuditLogFilter) -> AppResult<Vec<AuditLogEntry>> {
        let mut entries: Vec<AuditLogEntry> =
            self.store.read_collection(collections::AUDIT_LOG).await?;

        entries.retain(|entry| {
            filter.product_id.map_or(true, |id| entry.product_id == id)
                && filter.warehouse_id.map_or(true, |id| entry.warehouse_id == id)
                && filter.event_type.map_or(true, |kind| entry.event_type == kind)
                && filter.start_date.map_or(true, |start| entry.timestamp >= start)
                && filter.end_date.map_or(true, |end| entry.timestamp <= end)
        });

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(entries)
    }
}
