//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] and serialization errors with additional context about which
//! operation failed.

use stockroom_types::ItemId;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization or deserialization error on a feed payload.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The requested item does not exist in the catalog.
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// A change feed operation failed.
    #[error("Change feed error: {0}")]
    Feed(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
