//! HTTP handlers for audit log endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use shared::models::AuditLogEntry;

use crate::error::AppResult;
use crate::services::audit::AuditLogFilter;
use crate::services::AuditService;
use crate::AppState;

/// Query the audit log with optional filters, newest first
pub async fn query_audit_log(
    State(state): State<AppState>,
    Query(filter): Query<AuditLogFilter>,
) -> AppResult<Json<Vec<AuditLogEntry>>> {
    let service = AuditService::new(state.store.clone());
    let entries = service.query(filter).await?;
    Ok(Json(entries))
}
