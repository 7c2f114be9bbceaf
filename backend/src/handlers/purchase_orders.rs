//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use shared::models::PurchaseOrder;

use crate::error::AppResult;
use crate::services::stock::{CreatePurchaseOrderInput, PurchaseOrderReceipt};
use crate::services::StockService;
use crate::AppState;

/// List purchase orders, newest first
pub async fn list_purchase_orders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    let service = StockService::new(state.store.clone(), state.locks.clone());
    let orders = service.list_purchase_orders().await?;
    Ok(Json(orders))
}

/// Create a purchase order in pending state
pub async fn create_purchase_order(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = StockService::new(state.store.clone(), state.locks.clone());
    let order = service.create_purchase_order(input).await?;
    Ok(Json(order))
}

/// Receive a pending purchase order
pub async fn receive_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<PurchaseOrderReceipt>> {
    let service = StockService::new(state.store.clone(), state.locks.clone());
    let receipt = service.receive_purchase_order(order_id).await?;
    Ok(Json(receipt))
}
