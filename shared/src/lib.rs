//! Shared types and models for the Inventory Management Platform
//!
//! This crate contains the domain models, derivation rules, and validation
//! helpers shared between the backend and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
