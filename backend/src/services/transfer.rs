//! Warehouse-to-warehouse transfer execution
//!
//! A transfer is executed in one shot: validation, both ledger sides, the
//! persisted record, and the two-entry audit batch all happen inside a
//! single `stock_transaction` critical section. There is no persisted
//! in-transit phase.

use serde::Deserialize;

use shared::models::{StockEventType, Transfer, TransferStatus};
use shared::validation::{validate_quantity, validate_warehouse_pair};

use crate::error::{AppError, AppResult};
use crate::services::audit::AuditService;
use crate::services::ledger::StockLedger;
use crate::store::lock::LockManager;
use crate::store::{collections, generate_reference_number, next_id, JsonStore};

/// Transfer service for moving stock between warehouses
#[derive(Clone)]
pub struct TransferService {
    store: JsonStore,
    ledger: StockLedger,
}

/// Input for executing a transfer
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteTransferInput {
    pub product_id: i64,
    pub from_warehouse_id: i64,
    pub to_warehouse_id: i64,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl TransferService {
    pub fn new(store: JsonStore, locks: LockManager) -> Self {
        let audit = AuditService::new(store.clone());
        let ledger = StockLedger::new(store.clone(), locks, audit);
        Self { store, ledger }
    }

    /// Transfers, newest first
    pub async fn list_transfers(&self) -> AppResult<Vec<Transfer>> {
        let mut transfers: Vec<Transfer> =
            self.store.read_collection(collections::TRANSFERS).await?;
        transfers.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(transfers)
    }

    /// Move `quantity` units of a product between two warehouses.
    ///
    /// The source must hold enough stock; the destination entry is created
    /// on first arrival. Exactly one audit batch is written, carrying the
    /// out-side and in-side entries under one reference number.
    pub async fn execute_transfer(&self, input: ExecuteTransferInput) -> AppResult<Transfer> {
        validate_warehouse_pair(input.from_warehouse_id, input.to_warehouse_id)
            .map_err(|msg| AppError::validation("to_warehouse_id", msg))?;
        validate_quantity(input.quantity).map_err(|msg| AppError::validation("quantity", msg))?;

        let transfer = self
            .ledger
            .update(|mut txn| async move {
                let available = txn.quantity(input.product_id, input.from_warehouse_id);
                if input.quantity > available {
                    return Err(AppError::InsufficientStock { available });
                }

                let mut transfers: Vec<Transfer> =
                    self.store.read_collection(collections::TRANSFERS).await?;
                let id = next_id(transfers.iter().map(|t| t.id));
                let reference_number = generate_reference_number(
                    "TRF",
                    txn.timestamp().date_naive(),
                    transfers.iter().map(|t| t.reference_number.as_str()),
                );

                txn.apply(
                    input.product_id,
                    input.from_warehouse_id,
                    -input.quantity,
                    StockEventType::TransferOut,
                    &reference_number,
                    input.notes.clone(),
                )?;
                txn.apply(
                    input.product_id,
                    input.to_warehouse_id,
                    input.quantity,
                    StockEventType::TransferIn,
                    &reference_number,
                    input.notes.clone(),
                )?;

                let executed_at = txn.timestamp();
                let transfer = Transfer {
                    id,
                    reference_number,
                    product_id: input.product_id,
                    from_warehouse_id: input.from_warehouse_id,
                    to_warehouse_id: input.to_warehouse_id,
                    quantity: input.quantity,
                    status: TransferStatus::Completed,
                    created_at: executed_at,
                    completed_at: Some(executed_at),
                    notes: input.notes,
                };
                transfers.push(transfer.clone());
                self.store
                    .write_collection(collections::TRANSFERS, &transfers)
                    .await?;

                Ok((txn, transfer))
            })
            .await?;

        tracing::info!(
            reference = %transfer.reference_number,
            quantity = transfer.quantity,
            "transfer completed"
        );
        Ok(transfer)
    }
}
