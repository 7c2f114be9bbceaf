//! Product and warehouse catalog reads

use shared::models::{Product, Warehouse};

use crate::error::{AppError, AppResult};
use crate::store::{collections, JsonStore};

/// Catalog service for product and warehouse lookups
#[derive(Clone)]
pub struct CatalogService {
    store: JsonStore,
}

impl CatalogService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.store.read_collection(collections::PRODUCTS).await
    }

    pub async fn get_product(&self, product_id: i64) -> AppResult<Product> {
        let products: Vec<Product> = self.store.read_collection(collections::PRODUCTS).await?;
        products
            .into_iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    pub async fn list_warehouses(&self) -> AppResult<Vec<Warehouse>> {
        self.store.read_collection(collections::WAREHOUSES).await
    }
}
