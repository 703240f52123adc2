//! Data layer for the Stockroom inventory subsystem.
//!
//! `PostgreSQL` is the authoritative store: the `items` catalog, the
//! committed `transactions` history, and the stock/sales aggregate
//! functions. NATS carries the catalog change feed the replica consumes.
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool and configuration.
//! - [`item_store`] -- Catalog fetch, search, and mutations.
//! - [`stock_store`] -- Pull-only stock snapshot aggregates.
//! - [`transaction_store`] -- Atomic batch insertion of movements.
//! - [`sales_store`] -- Reporting aggregates, consumed as-is.
//! - [`feed`] -- NATS change feed client and scoped subscriptions.
//! - [`error`] -- The [`DbError`] taxonomy.

pub mod error;
pub mod feed;
pub mod item_store;
pub mod postgres;
pub mod sales_store;
pub mod stock_store;
pub mod transaction_store;

// Re-export primary types at crate root.
pub use error::DbError;
pub use feed::{ChangeFeed, ItemChangeSubscription};
pub use item_store::{ItemRow, ItemStore};
pub use postgres::{PostgresConfig, PostgresPool};
pub use sales_store::SalesStore;
pub use stock_store::StockStore;
pub use transaction_store::TransactionStore;
