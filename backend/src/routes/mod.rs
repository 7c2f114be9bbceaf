//! Route definitions for the Inventory Management Platform

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stock levels and direct mutations
        .nest("/stock", stock_routes())
        // Purchase order lifecycle
        .nest("/purchase-orders", purchase_order_routes())
        // Warehouse-to-warehouse transfers
        .nest("/transfers", transfer_routes())
        // Low-stock alerts
        .nest("/alerts", alert_routes())
        // Audit trail
        .nest("/audit-log", audit_routes())
        // Catalog reads
        .nest("/products", product_routes())
        .nest("/warehouses", warehouse_routes())
}

/// Stock level routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stock_levels))
        .route("/adjust", post(handlers::adjust_stock))
        .route("/reorder", post(handlers::reorder_stock))
}

/// Purchase order routes
fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchase_orders).post(handlers::create_purchase_order),
        )
        .route("/:order_id/receive", post(handlers::receive_purchase_order))
}

/// Transfer routes
fn transfer_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_transfers).post(handlers::execute_transfer),
    )
}

/// Alert routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_active_alerts))
        .route("/records", get(handlers::list_alert_records))
        .route(
            "/:product_id/:warehouse_id/status",
            put(handlers::update_alert_status),
        )
}

/// Audit log routes
fn audit_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::query_audit_log))
}

/// Product routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products))
        .route("/:product_id", get(handlers::get_product))
}

/// Warehouse routes
fn warehouse_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_warehouses))
}
