//! HTTP handlers for the Inventory Management Platform

pub mod alerts;
pub mod audit;
pub mod catalog;
pub mod health;
pub mod purchase_orders;
pub mod stock;
pub mod transfers;

pub use alerts::*;
pub use audit::*;
pub use catalog::*;
pub use health::*;
pub use purchase_orders::*;
pub use stock::*;
pub use transfers::*;
