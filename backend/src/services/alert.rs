//! Low-stock alert engine
//!
//! Severity and shortage are derived from the live stock level on every
//! read; only the workflow state (acknowledge/snooze/resolve) is persisted.
//! Workflow writes are best-effort and deliberately not serialized with the
//! stock lock: alert status is advisory UI state, not a ledger invariant.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use shared::models::{
    evaluate_severity, recommended_quantity, shortage, AlertRecord, AlertStatus, AlertView,
    Product, StockEntry, Warehouse,
};
use shared::types::SideEffect;

use crate::error::AppResult;
use crate::store::{collections, next_id, now, JsonStore};

/// Alert service for the derived projection and the workflow records
#[derive(Clone)]
pub struct AlertService {
    store: JsonStore,
}

/// Input for updating an alert's workflow status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAlertStatusInput {
    pub status: AlertStatus,
    pub snooze_until: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl AlertService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Derive the current active alerts from live stock levels.
    ///
    /// Resolved records suppress their pair; a snoozed record whose
    /// `snoozed_until` has passed while the pair is still breached surfaces
    /// as active again. Critical alerts sort first, then by shortage.
    pub async fn list_active_alerts(&self) -> AppResult<Vec<AlertView>> {
        let products: Vec<Product> = self.store.read_collection(collections::PRODUCTS).await?;
        let warehouses: Vec<Warehouse> =
            self.store.read_collection(collections::WAREHOUSES).await?;
        let stock: Vec<StockEntry> = self.store.read_collection(collections::STOCK).await?;
        let records: Vec<AlertRecord> = self.store.read_collection(collections::ALERTS).await?;
        let current_time = now();

        let mut views = Vec::new();
        for entry in &stock {
            let Some(product) = products.iter().find(|p| p.id == entry.product_id) else {
                continue;
            };
            let Some(severity) = evaluate_severity(product.reorder_point, entry.quantity) else {
                continue;
            };

            let record = records
                .iter()
                .find(|r| r.product_id == entry.product_id && r.warehouse_id == entry.warehouse_id);

            let status = match record {
                None => AlertStatus::Active,
                Some(r) => match r.status {
                    AlertStatus::Resolved => continue,
                    AlertStatus::Snoozed => {
                        // A snooze with no deadline stays snoozed until a
                        // caller changes it
                        let expired = r.snoozed_until.map_or(false, |until| until <= current_time);
                        if expired {
                            AlertStatus::Active
                        } else {
                            AlertStatus::Snoozed
                        }
                    }
                    other => other,
                },
            };

            let warehouse_name = warehouses
                .iter()
                .find(|w| w.id == entry.warehouse_id)
                .map(|w| w.name.clone())
                .unwrap_or_default();

            views.push(AlertView {
                product_id: entry.product_id,
                warehouse_id: entry.warehouse_id,
                product_name: product.name.clone(),
                warehouse_name,
                current_stock: entry.quantity,
                reorder_point: product.reorder_point,
                shortage: shortage(product.reorder_point, entry.quantity),
                severity,
                recommended_quantity: recommended_quantity(product.reorder_point, entry.quantity),
                status,
                snoozed_until: record.and_then(|r| r.snoozed_until),
                notes: record.and_then(|r| r.notes.clone()),
            });
        }

        views.sort_by(|a, b| {
            let rank = |view: &AlertView| match view.severity {
                shared::models::AlertSeverity::Critical => 0,
                shared::models::AlertSeverity::Low => 1,
            };
            rank(a).cmp(&rank(b)).then(b.shortage.cmp(&a.shortage))
        });
        Ok(views)
    }

    /// The persisted workflow records, untouched by derivation
    pub async fn list_records(&self) -> AppResult<Vec<AlertRecord>> {
        self.store.read_collection(collections::ALERTS).await
    }

    /// Transition the workflow record for a (product, warehouse) pair,
    /// creating it on first touch.
    pub async fn update_alert_status(
        &self,
        product_id: i64,
        warehouse_id: i64,
        input: UpdateAlertStatusInput,
    ) -> AppResult<AlertRecord> {
        let mut records: Vec<AlertRecord> = self.store.read_collection(collections::ALERTS).await?;
        let current_time = now();

        let index = match records
            .iter()
            .position(|r| r.product_id == product_id && r.warehouse_id == warehouse_id)
        {
            Some(index) => index,
            None => {
                records.push(AlertRecord {
                    id: next_id(records.iter().map(|r| r.id)),
                    product_id,
                    warehouse_id,
                    status: AlertStatus::Active,
                    acknowledged_at: None,
                    resolved_at: None,
                    snoozed_until: None,
                    notes: None,
                    created_at: current_time,
                    updated_at: current_time,
                });
                records.len() - 1
            }
        };

        let record = &mut records[index];
        record.status = input.status;
        match input.status {
            AlertStatus::Acknowledged => record.acknowledged_at = Some(current_time),
            AlertStatus::Resolved => record.resolved_at = Some(current_time),
            AlertStatus::Snoozed => record.snoozed_until = input.snooze_until,
            AlertStatus::Active => record.snoozed_until = None,
        }
        if input.notes.is_some() {
            record.notes = input.notes;
        }
        record.updated_at = current_time;
        let updated = record.clone();

        self.store
            .write_collection(collections::ALERTS, &records)
            .await?;
        Ok(updated)
    }

    /// Auto-resolve the pair's alert after a purchase order receipt.
    ///
    /// Any receipt resolves the alert, even a partial one that leaves stock
    /// below the reorder point.
    /// TODO: confirm with product whether a partial receipt should really
    /// resolve rather than re-evaluate the breach.
    pub async fn resolve_on_receipt(
        &self,
        product_id: i64,
        warehouse_id: i64,
        order_id: i64,
    ) -> SideEffect {
        let result = self
            .apply_system_transition(product_id, warehouse_id, |record, at| {
                if record.status == AlertStatus::Resolved {
                    return false;
                }
                record.status = AlertStatus::Resolved;
                record.resolved_at = Some(at);
                append_note(
                    record,
                    &format!("Auto-resolved by receipt of purchase order #{}", order_id),
                );
                true
            })
            .await;

        match result {
            Ok(true) => SideEffect::Applied,
            Ok(false) => SideEffect::Skipped,
            Err(e) => {
                tracing::warn!(product_id, warehouse_id, error = %e, "alert auto-resolve failed");
                SideEffect::Failed(e.to_string())
            }
        }
    }

    /// Best-effort acknowledge when a reorder is placed for the pair.
    /// Failures are logged and reported, never propagated.
    pub async fn acknowledge_on_reorder(
        &self,
        product_id: i64,
        warehouse_id: i64,
        order_id: i64,
    ) -> SideEffect {
        let result = self
            .apply_system_transition(product_id, warehouse_id, |record, at| {
                if record.status != AlertStatus::Active {
                    return false;
                }
                record.status = AlertStatus::Acknowledged;
                record.acknowledged_at = Some(at);
                append_note(
                    record,
                    &format!("Acknowledged by reorder (purchase order #{})", order_id),
                );
                true
            })
            .await;

        match result {
            Ok(true) => SideEffect::Applied,
            Ok(false) => SideEffect::Skipped,
            Err(e) => {
                tracing::warn!(product_id, warehouse_id, error = %e, "alert auto-acknowledge failed");
                SideEffect::Failed(e.to_string())
            }
        }
    }

    /// Find the pair's record and run a transition on it. Returns false when
    /// there is no record or the transition declines to apply.
    async fn apply_system_transition(
        &self,
        product_id: i64,
        warehouse_id: i64,
        transition: impl FnOnce(&mut AlertRecord, DateTime<Utc>) -> bool,
    ) -> AppResult<bool> {
        let mut records: Vec<AlertRecord> = self.store.read_collection(collections::ALERTS).await?;
        let current_time = now();

        let Some(index) = records
            .iter()
            .position(|r| r.product_id == product_id && r.warehouse_id == warehouse_id)
        else {
            return Ok(false);
        };

        if !transition(&mut records[index], current_time) {
            return Ok(false);
        }
        records[index].updated_at = current_time;

        self.store
            .write_collection(collections::ALERTS, &records)
            .await?;
        Ok(true)
    }
}

fn append_note(record: &mut AlertRecord, note: &str) {
    record.notes = Some(match record.notes.take() {
        Some(existing) => format!("{}\n{}", existing, note),
        None => note.to_string(),
    });
}
