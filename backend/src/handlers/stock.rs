//! HTTP handlers for stock level endpoints

use axum::{extract::State, Json};

use shared::models::StockEntry;

use crate::error::AppResult;
use crate::services::stock::{AdjustStockInput, CreatePurchaseOrderInput, ReorderReceipt};
use crate::services::StockService;
use crate::AppState;

/// List current stock levels
pub async fn list_stock_levels(State(state): State<AppState>) -> AppResult<Json<Vec<StockEntry>>> {
    let service = StockService::new(state.store.clone(), state.locks.clone());
    let levels = service.list_stock_levels().await?;
    Ok(Json(levels))
}

/// Apply a manual stock adjustment
pub async fn adjust_stock(
    State(state): State<AppState>,
    Json(input): Json<AdjustStockInput>,
) -> AppResult<Json<StockEntry>> {
    let service = StockService::new(state.store.clone(), state.locks.clone());
    let entry = service.adjust_stock(input).await?;
    Ok(Json(entry))
}

/// Place a reorder for a low-stock pair
pub async fn reorder_stock(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<Json<ReorderReceipt>> {
    let service = StockService::new(state.store.clone(), state.locks.clone());
    let receipt = service.reorder_stock(input).await?;
    Ok(Json(receipt))
}
