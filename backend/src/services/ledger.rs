//! The stock-ledger choke point
//!
//! Every code path that mutates stock quantities goes through
//! [`StockLedger::update`]: the `stock_transaction` lock is taken, the
//! ledger is loaded, the operation runs against a [`StockTxn`], and the
//! updated ledger plus the operation's audit batch are written back before
//! the lock is released. [`StockTxn::apply`] is the only place a quantity
//! changes, so non-negativity and the audit trail are enforced structurally
//! rather than at each call site.

use std::future::Future;

use chrono::{DateTime, Utc};

use shared::models::{StockEntry, StockEventType};

use crate::error::{AppError, AppResult};
use crate::services::audit::{AuditService, StockChange};
use crate::store::lock::{LockManager, STOCK_LOCK};
use crate::store::{collections, next_id, now, JsonStore};

/// Serialized access to the stock collection
#[derive(Clone)]
pub struct StockLedger {
    store: JsonStore,
    locks: LockManager,
    audit: AuditService,
}

/// In-flight view of the stock collection inside one critical section
pub struct StockTxn {
    entries: Vec<StockEntry>,
    changes: Vec<StockChange>,
    timestamp: DateTime<Utc>,
    dirty: bool,
}

impl StockTxn {
    fn new(entries: Vec<StockEntry>) -> Self {
        Self {
            entries,
            changes: Vec::new(),
            timestamp: now(),
            dirty: false,
        }
    }

    /// Timestamp shared by every change in this critical section
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Current quantity for a pair, zero when no entry exists
    pub fn quantity(&self, product_id: i64, warehouse_id: i64) -> i64 {
        self.entries
            .iter()
            .find(|entry| entry.product_id == product_id && entry.warehouse_id == warehouse_id)
            .map_or(0, |entry| entry.quantity)
    }

    /// Apply a signed delta to a (product, warehouse) pair.
    ///
    /// A positive delta on a missing pair creates its entry; a delta that
    /// would drive the quantity below zero fails with the available amount
    /// and leaves the transaction untouched. Each successful application
    /// queues one audit change carrying the observed before/after.
    pub fn apply(
        &mut self,
        product_id: i64,
        warehouse_id: i64,
        delta: i64,
        event_type: StockEventType,
        reference_number: &str,
        notes: Option<String>,
    ) -> AppResult<StockEntry> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.product_id == product_id && entry.warehouse_id == warehouse_id);

        let before = position.map_or(0, |index| self.entries[index].quantity);
        let after = before + delta;
        if after < 0 {
            return Err(AppError::InsufficientStock { available: before });
        }

        let entry = match position {
            Some(index) => {
                self.entries[index].quantity = after;
                self.entries[index].clone()
            }
            None => {
                let entry = StockEntry {
                    id: next_id(self.entries.iter().map(|entry| entry.id)),
                    product_id,
                    warehouse_id,
                    quantity: after,
                };
                self.entries.push(entry.clone());
                entry
            }
        };

        self.dirty = true;
        self.changes.push(StockChange {
            event_type,
            reference_number: reference_number.to_string(),
            product_id,
            warehouse_id,
            quantity_change: delta,
            quantity_before: before,
            quantity_after: after,
            timestamp: self.timestamp,
            notes,
        });

        Ok(entry)
    }
}

impl StockLedger {
    pub fn new(store: JsonStore, locks: LockManager, audit: AuditService) -> Self {
        Self {
            store,
            locks,
            audit,
        }
    }

    /// Run `op` with exclusive access to the stock ledger.
    ///
    /// The operation receives the transaction by value and hands it back
    /// alongside its result; the ledger write and the batched audit write
    /// both happen inside the critical section, after the operation
    /// succeeds. A failing operation writes nothing.
    pub async fn update<T, F, Fut>(&self, op: F) -> AppResult<T>
    where
        F: FnOnce(StockTxn) -> Fut,
        Fut: Future<Output = AppResult<(StockTxn, T)>>,
    {
        self.locks
            .run_exclusive(STOCK_LOCK, || async {
                let entries: Vec<StockEntry> =
                    self.store.read_collection(collections::STOCK).await?;
                let txn = StockTxn::new(entries);

                let (txn, value) = op(txn).await?;

                if txn.dirty {
                    self.store
                        .write_collection(collections::STOCK, &txn.entries)
                        .await?;
                }
                if !txn.changes.is_empty() {
                    self.audit.log_stock_changes(txn.changes).await?;
                }
                Ok(value)
            })
            .await
    }
}
