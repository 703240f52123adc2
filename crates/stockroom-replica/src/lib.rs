//! Local catalog replica for the Stockroom inventory subsystem.
//!
//! The replica is an in-memory mirror of the `items` catalog: one full
//! fetch establishes the baseline, then insert/update/delete events from
//! the change feed are applied in arrival order. The mirror is eventually
//! consistent and read-only to everything outside this crate.
//!
//! # Modules
//!
//! - [`replica`] -- The [`Replica`]: pure event application and read views.
//! - [`sync`] -- The [`Synchronizer`]: wires the full fetch and the feed
//!   subscription to a replica instance.
//!
//! # Failure model
//!
//! A failed fetch or a lost subscription never corrupts the mirror: the
//! replica stays frozen at its last consistent state until the caller
//! reloads or resubscribes. Retry and backoff are caller concerns.

pub mod replica;
pub mod sync;

// Re-export primary types at crate root.
pub use replica::Replica;
pub use sync::Synchronizer;

use stockroom_db::DbError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while synchronizing the replica.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The initial full catalog fetch failed; the replica keeps its
    /// previous state.
    #[error("catalog fetch failed: {0}")]
    Fetch(#[source] DbError),

    /// The change feed subscription could not be opened or delivered an
    /// undecodable payload; the replica keeps its last applied state.
    #[error("change feed subscription failed: {0}")]
    Subscription(#[source] DbError),
}
