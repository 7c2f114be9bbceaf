//! Business logic services for the Inventory Management Platform

pub mod alert;
pub mod audit;
pub mod catalog;
pub mod ledger;
pub mod stock;
pub mod transfer;

pub use alert::AlertService;
pub use audit::AuditService;
pub use catalog::CatalogService;
pub use ledger::StockLedger;
pub use stock::StockService;
pub use transfer::TransferService;
