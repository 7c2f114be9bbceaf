//! Stock service: purchase-order lifecycle, manual adjustments, reorders
//!
//! All ledger effects run through [`StockLedger::update`]; the receipt path
//! included, which the previous generation of this system left outside the
//! lock and could race a concurrent transfer.

use serde::{Deserialize, Serialize};

use shared::models::{PurchaseOrder, PurchaseOrderStatus, StockEntry, StockEventType};
use shared::types::SideEffect;
use shared::validation::{validate_adjustment_delta, validate_quantity, validate_reason};

use crate::error::{AppError, AppResult};
use crate::services::alert::AlertService;
use crate::services::audit::AuditService;
use crate::services::ledger::StockLedger;
use crate::store::lock::LockManager;
use crate::store::{collections, generate_reference_number, next_id, now, JsonStore};

/// Stock service for order lifecycle and direct ledger mutations
#[derive(Clone)]
pub struct StockService {
    store: JsonStore,
    ledger: StockLedger,
    alerts: AlertService,
}

/// Input for creating a purchase order
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePurchaseOrderInput {
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i64,
}

/// Input for a manual stock adjustment
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustStockInput {
    pub product_id: i64,
    pub warehouse_id: i64,
    /// Signed delta; positive adds stock, negative removes it
    pub delta: i64,
    pub reason: String,
}

/// Result of receiving a purchase order
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderReceipt {
    pub order: PurchaseOrder,
    pub new_stock_quantity: i64,
    pub alert_update: SideEffect,
}

/// Result of the reorder convenience wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ReorderReceipt {
    pub order: PurchaseOrder,
    pub message: String,
    pub alert_update: SideEffect,
}

impl StockService {
    pub fn new(store: JsonStore, locks: LockManager) -> Self {
        let audit = AuditService::new(store.clone());
        let ledger = StockLedger::new(store.clone(), locks, audit);
        let alerts = AlertService::new(store.clone());
        Self {
            store,
            ledger,
            alerts,
        }
    }

    /// Current stock levels, as stored
    pub async fn list_stock_levels(&self) -> AppResult<Vec<StockEntry>> {
        self.store.read_collection(collections::STOCK).await
    }

    /// Purchase orders, newest first
    pub async fn list_purchase_orders(&self) -> AppResult<Vec<PurchaseOrder>> {
        let mut orders: Vec<PurchaseOrder> = self
            .store
            .read_collection(collections::PURCHASE_ORDERS)
            .await?;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    /// Create a purchase order in `pending` state. No ledger effect yet.
    pub async fn create_purchase_order(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        validate_quantity(input.quantity).map_err(|msg| AppError::validation("quantity", msg))?;

        let mut orders: Vec<PurchaseOrder> = self
            .store
            .read_collection(collections::PURCHASE_ORDERS)
            .await?;
        let order = PurchaseOrder {
            id: next_id(orders.iter().map(|o| o.id)),
            product_id: input.product_id,
            warehouse_id: input.warehouse_id,
            quantity: input.quantity,
            status: PurchaseOrderStatus::Pending,
            order_date: now(),
            received_date: None,
        };
        orders.push(order.clone());
        self.store
            .write_collection(collections::PURCHASE_ORDERS, &orders)
            .await?;

        tracing::info!(order_id = order.id, quantity = order.quantity, "purchase order created");
        Ok(order)
    }

    /// Receive a pending purchase order: add its quantity to the ledger
    /// (creating the stock entry on first arrival), mark it received, and
    /// auto-resolve the pair's alert.
    ///
    /// Receiving is terminal; a second receipt fails without touching the
    /// ledger.
    pub async fn receive_purchase_order(&self, order_id: i64) -> AppResult<PurchaseOrderReceipt> {
        let (order, entry) = self
            .ledger
            .update(|mut txn| async move {
                let mut orders: Vec<PurchaseOrder> = self
                    .store
                    .read_collection(collections::PURCHASE_ORDERS)
                    .await?;
                let index = orders
                    .iter()
                    .position(|o| o.id == order_id)
                    .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

                if orders[index].status != PurchaseOrderStatus::Pending {
                    return Err(AppError::InvalidStateTransition(format!(
                        "Purchase order {} is already {}",
                        order_id,
                        orders[index].status.as_str()
                    )));
                }

                let reference = format!("PO-{}", order_id);
                let entry = txn.apply(
                    orders[index].product_id,
                    orders[index].warehouse_id,
                    orders[index].quantity,
                    StockEventType::PurchaseReceived,
                    &reference,
                    None,
                )?;

                orders[index].status = PurchaseOrderStatus::Received;
                orders[index].received_date = Some(txn.timestamp());
                let order = orders[index].clone();
                self.store
                    .write_collection(collections::PURCHASE_ORDERS, &orders)
                    .await?;

                Ok((txn, (order, entry)))
            })
            .await?;

        // Workflow side effect, outside the critical section
        let alert_update = self
            .alerts
            .resolve_on_receipt(order.product_id, order.warehouse_id, order.id)
            .await;

        tracing::info!(
            order_id,
            new_quantity = entry.quantity,
            "purchase order received"
        );
        Ok(PurchaseOrderReceipt {
            order,
            new_stock_quantity: entry.quantity,
            alert_update,
        })
    }

    /// Apply a signed manual adjustment to one stock entry
    pub async fn adjust_stock(&self, input: AdjustStockInput) -> AppResult<StockEntry> {
        validate_adjustment_delta(input.delta).map_err(|msg| AppError::validation("delta", msg))?;
        validate_reason(&input.reason).map_err(|msg| AppError::validation("reason", msg))?;

        self.ledger
            .update(|mut txn| async move {
                let existing: Vec<shared::models::AuditLogEntry> =
                    self.store.read_collection(collections::AUDIT_LOG).await?;
                let reference = generate_reference_number(
                    "ADJ",
                    txn.timestamp().date_naive(),
                    existing.iter().map(|e| e.reference_number.as_str()),
                );

                let entry = txn.apply(
                    input.product_id,
                    input.warehouse_id,
                    input.delta,
                    StockEventType::Adjustment,
                    &reference,
                    Some(input.reason.clone()),
                )?;
                Ok((txn, entry))
            })
            .await
    }

    /// Convenience wrapper used by the low-stock view: place a purchase
    /// order and best-effort acknowledge the pair's alert.
    pub async fn reorder_stock(&self, input: CreatePurchaseOrderInput) -> AppResult<ReorderReceipt> {
        let order = self.create_purchase_order(input).await?;
        let alert_update = self
            .alerts
            .acknowledge_on_reorder(order.product_id, order.warehouse_id, order.id)
            .await;

        let message = format!(
            "Reorder placed: purchase order #{} for {} units",
            order.id, order.quantity
        );
        Ok(ReorderReceipt {
            order,
            message,
            alert_update,
        })
    }
}
