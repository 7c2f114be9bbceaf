//! Product and warehouse catalog models

use serde::{Deserialize, Serialize};

/// A product tracked by the inventory system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    /// Stock at or below this level raises a low-stock alert
    pub reorder_point: i64,
}

/// A physical warehouse location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
}
