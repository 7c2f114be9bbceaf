//! Inventory Management Platform - Backend
//!
//! Products, warehouses, stock levels, purchase orders, transfers, and
//! low-stock alerts over a flat-file JSON datastore. All stock mutations run
//! through a named-lock critical section and leave an audit trail.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use store::{lock::LockManager, JsonStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
    pub locks: LockManager,
    pub config: Arc<Config>,
}
