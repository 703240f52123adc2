//! Shared type definitions for the Stockroom inventory subsystem.
//!
//! This crate is the single source of truth for the types used across the
//! Stockroom workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the web UI layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for store-assigned keys
//! - [`enums`] -- The stock movement direction
//! - [`structs`] -- Catalog, stock, cart, transaction, and reporting types

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::MovementType;
pub use ids::ItemId;
pub use structs::{
    CartLine, ChangeEvent, DateRange, Item, SalesByCategory, SalesByItem, StockLevel,
    StockSnapshot, TransactionRecord,
};
