//! HTTP handlers for low-stock alert endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use shared::models::{AlertRecord, AlertView};

use crate::error::AppResult;
use crate::services::alert::UpdateAlertStatusInput;
use crate::services::AlertService;
use crate::AppState;

/// List the derived active alerts
pub async fn list_active_alerts(State(state): State<AppState>) -> AppResult<Json<Vec<AlertView>>> {
    let service = AlertService::new(state.store.clone());
    let alerts = service.list_active_alerts().await?;
    Ok(Json(alerts))
}

/// List the persisted alert workflow records
pub async fn list_alert_records(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AlertRecord>>> {
    let service = AlertService::new(state.store.clone());
    let records = service.list_records().await?;
    Ok(Json(records))
}

/// Update the workflow status for a (product, warehouse) pair
pub async fn update_alert_status(
    State(state): State<AppState>,
    Path((product_id, warehouse_id)): Path<(i64, i64)>,
    Json(input): Json<UpdateAlertStatusInput>,
) -> AppResult<Json<AlertRecord>> {
    let service = AlertService::new(state.store.clone());
    let record = service
        .update_alert_status(product_id, warehouse_id, input)
        .await?;
    Ok(Json(record))
}
