//! HTTP handlers for transfer endpoints

use axum::{extract::State, Json};

use shared::models::Transfer;

use crate::error::AppResult;
use crate::services::transfer::ExecuteTransferInput;
use crate::services::TransferService;
use crate::AppState;

/// List transfers, newest first
pub async fn list_transfers(State(state): State<AppState>) -> AppResult<Json<Vec<Transfer>>> {
    let service = TransferService::new(state.store.clone(), state.locks.clone());
    let transfers = service.list_transfers().await?;
    Ok(Json(transfers))
}

/// Execute a warehouse-to-warehouse transfer
pub async fn execute_transfer(
    State(state): State<AppState>,
    Json(input): Json<ExecuteTransferInput>,
) -> AppResult<Json<Transfer>> {
    let service = TransferService::new(state.store.clone(), state.locks.clone());
    let transfer = service.execute_transfer(input).await?;
    Ok(Json(transfer))
}
