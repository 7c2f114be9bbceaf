//! Purchase-order lifecycle, manual adjustment, and reorder wrapper tests

mod support;

use inventory_management_backend::error::AppError;
use inventory_management_backend::services::stock::{AdjustStockInput, CreatePurchaseOrderInput};
use inventory_management_backend::services::StockService;
use inventory_management_backend::store::collections;
use shared::models::{AlertRecord, AlertStatus, AuditLogEntry, PurchaseOrderStatus, StockEventType};
use shared::types::SideEffect;

use support::{
    alert_record, seed_alerts, seed_stock, stock_entry, stock_quantity, test_store, TestStore,
};

fn service(fixture: &TestStore) -> StockService {
    StockService::new(fixture.store.clone(), fixture.locks.clone())
}

fn order_input(product_id: i64, warehouse_id: i64, quantity: i64) -> CreatePurchaseOrderInput {
    CreatePurchaseOrderInput {
        product_id,
        warehouse_id,
        quantity,
    }
}

#[tokio::test]
async fn test_create_purchase_order_starts_pending() {
    let fixture = test_store().await;
    let service = service(&fixture);

    let order = service
        .create_purchase_order(order_input(1, 1, 25))
        .await
        .unwrap();

    assert_eq!(order.id, 1);
    assert_eq!(order.status, PurchaseOrderStatus::Pending);
    assert!(order.received_date.is_none());

    // No ledger effect yet
    assert_eq!(stock_quantity(&fixture.store, 1, 1).await, None);
}

#[tokio::test]
async fn test_create_purchase_order_rejects_non_positive_quantity() {
    let fixture = test_store().await;
    let service = service(&fixture);

    for quantity in [0, -10] {
        let err = service
            .create_purchase_order(order_input(1, 1, quantity))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}

#[tokio::test]
async fn test_receive_creates_stock_entry_at_exact_quantity() {
    let fixture = test_store().await;
    let service = service(&fixture);

    let order = service
        .create_purchase_order(order_input(1, 3, 20))
        .await
        .unwrap();
    let receipt = service.receive_purchase_order(order.id).await.unwrap();

    assert_eq!(receipt.new_stock_quantity, 20);
    assert_eq!(receipt.order.status, PurchaseOrderStatus::Received);
    assert!(receipt.order.received_date.is_some());
    assert_eq!(stock_quantity(&fixture.store, 1, 3).await, Some(20));
}

#[tokio::test]
async fn test_receive_adds_to_existing_entry() {
    let fixture = test_store().await;
    seed_stock(&fixture.store, &[stock_entry(1, 1, 1, 10)]).await;
    let service = service(&fixture);

    let order = service
        .create_purchase_order(order_input(1, 1, 15))
        .await
        .unwrap();
    let receipt = service.receive_purchase_order(order.id).await.unwrap();

    assert_eq!(receipt.new_stock_quantity, 25);
    assert_eq!(stock_quantity(&fixture.store, 1, 1).await, Some(25));
}

#[tokio::test]
async fn test_receive_is_terminal_and_never_double_applies() {
    let fixture = test_store().await;
    let service = service(&fixture);

    let order = service
        .create_purchase_order(order_input(1, 1, 20))
        .await
        .unwrap();
    service.receive_purchase_order(order.id).await.unwrap();

    let err = service.receive_purchase_order(order.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidStateTransition(_)));
    assert!(err.to_string().contains("received"));

    // Quantity applied exactly once, audited exactly once
    assert_eq!(stock_quantity(&fixture.store, 1, 1).await, Some(20));
    let entries: Vec<AuditLogEntry> = fixture
        .store
        .read_collection(collections::AUDIT_LOG)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, StockEventType::PurchaseReceived);
    assert_eq!(entries[0].reference_number, format!("PO-{}", order.id));
}

#[tokio::test]
async fn test_receive_unknown_order_not_found() {
    let fixture = test_store().await;
    let service = service(&fixture);

    let err = service.receive_purchase_order(99).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_receive_auto_resolves_alert() {
    let fixture = test_store().await;
    seed_alerts(&fixture.store, &[alert_record(1, 1, 1, AlertStatus::Active)]).await;
    let service = service(&fixture);

    let order = service
        .create_purchase_order(order_input(1, 1, 5))
        .await
        .unwrap();
    let receipt = service.receive_purchase_order(order.id).await.unwrap();

    assert_eq!(receipt.alert_update, SideEffect::Applied);

    let records: Vec<AlertRecord> = fixture
        .store
        .read_collection(collections::ALERTS)
        .await
        .unwrap();
    assert_eq!(records[0].status, AlertStatus::Resolved);
    assert!(records[0].resolved_at.is_some());
    assert!(records[0]
        .notes
        .as_deref()
        .unwrap()
        .contains("Auto-resolved"));
}

#[tokio::test]
async fn test_receive_without_alert_record_skips_side_effect() {
    let fixture = test_store().await;
    let service = service(&fixture);

    let order = service
        .create_purchase_order(order_input(1, 1, 5))
        .await
        .unwrap();
    let receipt = service.receive_purchase_order(order.id).await.unwrap();

    assert_eq!(receipt.alert_update, SideEffect::Skipped);
}

#[tokio::test]
async fn test_adjust_stock_applies_signed_deltas() {
    let fixture = test_store().await;
    seed_stock(&fixture.store, &[stock_entry(1, 1, 1, 50)]).await;
    let service = service(&fixture);

    let entry = service
        .adjust_stock(AdjustStockInput {
            product_id: 1,
            warehouse_id: 1,
            delta: 25,
            reason: "cycle count correction".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(entry.quantity, 75);

    let entry = service
        .adjust_stock(AdjustStockInput {
            product_id: 1,
            warehouse_id: 1,
            delta: -10,
            reason: "damaged in transit".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(entry.quantity, 65);

    let entries: Vec<AuditLogEntry> = fixture
        .store
        .read_collection(collections::AUDIT_LOG)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .all(|e| e.event_type == StockEventType::Adjustment));
    assert!(entries.iter().all(|e| e.reference_number.starts_with("ADJ-")));
    assert_eq!(entries[1].notes.as_deref(), Some("damaged in transit"));
}

#[tokio::test]
async fn test_adjust_rejects_zero_delta_and_blank_reason() {
    let fixture = test_store().await;
    let service = service(&fixture);

    let err = service
        .adjust_stock(AdjustStockInput {
            product_id: 1,
            warehouse_id: 1,
            delta: 0,
            reason: "anything".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = service
        .adjust_stock(AdjustStockInput {
            product_id: 1,
            warehouse_id: 1,
            delta: 5,
            reason: "   ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_adjust_never_drives_quantity_negative() {
    let fixture = test_store().await;
    seed_stock(&fixture.store, &[stock_entry(1, 1, 1, 5)]).await;
    let service = service(&fixture);

    let err = service
        .adjust_stock(AdjustStockInput {
            product_id: 1,
            warehouse_id: 1,
            delta: -10,
            reason: "shrinkage".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        AppError::InsufficientStock { available } => assert_eq!(available, 5),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(stock_quantity(&fixture.store, 1, 1).await, Some(5));
}

#[tokio::test]
async fn test_reorder_places_order_and_acknowledges_alert() {
    let fixture = test_store().await;
    seed_alerts(&fixture.store, &[alert_record(1, 2, 4, AlertStatus::Active)]).await;
    let service = service(&fixture);

    let receipt = service.reorder_stock(order_input(2, 4, 60)).await.unwrap();

    assert_eq!(receipt.order.status, PurchaseOrderStatus::Pending);
    assert!(receipt.message.contains(&format!("#{}", receipt.order.id)));
    assert!(receipt.message.contains("60"));
    assert_eq!(receipt.alert_update, SideEffect::Applied);

    let records: Vec<AlertRecord> = fixture
        .store
        .read_collection(collections::ALERTS)
        .await
        .unwrap();
    assert_eq!(records[0].status, AlertStatus::Acknowledged);
    assert!(records[0].acknowledged_at.is_some());
}

#[tokio::test]
async fn test_reorder_without_active_alert_reports_skipped() {
    let fixture = test_store().await;
    let service = service(&fixture);

    let receipt = service.reorder_stock(order_input(2, 4, 60)).await.unwrap();
    assert_eq!(receipt.order.status, PurchaseOrderStatus::Pending);
    assert_eq!(receipt.alert_update, SideEffect::Skipped);
}

#[tokio::test]
async fn test_purchase_orders_listed_newest_first() {
    let fixture = test_store().await;
    let service = service(&fixture);

    for quantity in [10, 20, 30] {
        service
            .create_purchase_order(order_input(1, 1, quantity))
            .await
            .unwrap();
    }

    let orders = service.list_purchase_orders().await.unwrap();
    assert_eq!(orders.len(), 3);
    assert!(orders.windows(2).all(|pair| pair[0].id > pair[1].id));
}
