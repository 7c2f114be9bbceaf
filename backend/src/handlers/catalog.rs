//! HTTP handlers for product and warehouse endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use shared::models::{Product, Warehouse};

use crate::error::AppResult;
use crate::services::CatalogService;
use crate::AppState;

/// List all products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.store.clone());
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Get one product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.store.clone());
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// List all warehouses
pub async fn list_warehouses(State(state): State<AppState>) -> AppResult<Json<Vec<Warehouse>>> {
    let service = CatalogService::new(state.store.clone());
    let warehouses = service.list_warehouses().await?;
    Ok(Json(warehouses))
}
