//! Shared fixtures for the integration tests: each test gets its own
//! temporary data directory with a store and lock manager pointed at it.
#![allow(dead_code)]

use tempfile::TempDir;

use inventory_management_backend::store::lock::{LockManager, LockSettings};
use inventory_management_backend::store::{collections, JsonStore};
use shared::models::{AlertRecord, AlertStatus, Product, StockEntry, Warehouse};

pub struct TestStore {
    pub store: JsonStore,
    pub locks: LockManager,
    // Held so the directory outlives the test
    _dir: TempDir,
}

/// Fresh store + lock manager over a temporary data directory
pub async fn test_store() -> TestStore {
    test_store_with(LockSettings::default()).await
}

/// Same, with custom lock settings
pub async fn test_store_with(settings: LockSettings) -> TestStore {
    let dir = TempDir::new().expect("create temp data dir");
    let store = JsonStore::new(dir.path());
    store.ensure_data_dir().await.expect("create data dir");
    let locks = LockManager::new(store.lock_dir(), settings);
    locks.ensure_lock_dir().await.expect("create lock dir");
    TestStore {
        store,
        locks,
        _dir: dir,
    }
}

pub fn stock_entry(id: i64, product_id: i64, warehouse_id: i64, quantity: i64) -> StockEntry {
    StockEntry {
        id,
        product_id,
        warehouse_id,
        quantity,
    }
}

pub fn product(id: i64, name: &str, reorder_point: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        sku: format!("SKU-{:03}", id),
        category: None,
        reorder_point,
    }
}

pub fn warehouse(id: i64, name: &str) -> Warehouse {
    Warehouse {
        id,
        name: name.to_string(),
        location: None,
    }
}

pub fn alert_record(
    id: i64,
    product_id: i64,
    warehouse_id: i64,
    status: AlertStatus,
) -> AlertRecord {
    let created_at = inventory_management_backend::store::now();
    AlertRecord {
        id,
        product_id,
        warehouse_id,
        status,
        acknowledged_at: None,
        resolved_at: None,
        snoozed_until: None,
        notes: None,
        created_at,
        updated_at: created_at,
    }
}

pub async fn seed_stock(store: &JsonStore, entries: &[StockEntry]) {
    store
        .write_collection(collections::STOCK, entries)
        .await
        .expect("seed stock");
}

pub async fn seed_products(store: &JsonStore, products: &[Product]) {
    store
        .write_collection(collections::PRODUCTS, products)
        .await
        .expect("seed products");
}

pub async fn seed_warehouses(store: &JsonStore, warehouses: &[Warehouse]) {
    store
        .write_collection(collections::WAREHOUSES, warehouses)
        .await
        .expect("seed warehouses");
}

pub async fn seed_alerts(store: &JsonStore, records: &[AlertRecord]) {
    store
        .write_collection(collections::ALERTS, records)
        .await
        .expect("seed alerts");
}

pub async fn read_stock(store: &JsonStore) -> Vec<StockEntry> {
    store
        .read_collection(collections::STOCK)
        .await
        .expect("read stock")
}

pub async fn stock_quantity(store: &JsonStore, product_id: i64, warehouse_id: i64) -> Option<i64> {
    read_stock(store)
        .await
        .into_iter()
        .find(|e| e.product_id == product_id && e.warehouse_id == warehouse_id)
        .map(|e| e.quantity)
}
