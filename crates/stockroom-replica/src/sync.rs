//! The synchronizer: full fetch plus change feed, applied to one replica.
//!
//! One [`Synchronizer`] instance backs one consuming scope (a mounted
//! catalog view, a test harness). It owns the [`Replica`] for its
//! lifetime and hands out read-only views; the subscription handle it
//! opens must be torn down on every exit path of that scope.

use sqlx::PgPool;
use tracing::{info, warn};

use stockroom_db::feed::{ChangeFeed, ItemChangeSubscription};
use stockroom_db::item_store::ItemStore;
use stockroom_types::ChangeEvent;

use crate::SyncError;
use crate::replica::Replica;

/// Keeps a [`Replica`] consistent with the authoritative catalog.
pub struct Synchronizer {
    pool: PgPool,
    feed: ChangeFeed,
    replica: Replica,
}

impl Synchronizer {
    /// Create a synchronizer with an empty replica.
    pub const fn new(pool: PgPool, feed: ChangeFeed) -> Self {
        Self {
            pool,
            feed,
            replica: Replica::new(),
        }
    }

    /// Read-only view of the mirrored catalog.
    pub const fn replica(&self) -> &Replica {
        &self.replica
    }

    /// Perform one full catalog fetch and replace the replica wholesale.
    ///
    /// On failure the replica keeps its previous state; no partial
    /// overwrite is ever visible. The synchronizer does not retry.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fetch`] on a transport or backend failure.
    pub async fn load(&mut self) -> Result<(), SyncError> {
        let items = ItemStore::new(&self.pool)
            .fetch_all()
            .await
            .map_err(SyncError::Fetch)?;

        self.replica.replace_all(items);
        info!(count = self.replica.len(), "catalog replica loaded");
        Ok(())
    }

    /// Open the change feed subscription for the catalog.
    ///
    /// The handle is a scoped resource: unsubscribe on every exit path
    /// of the consuming scope so no listener outlives it.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Subscription`] if the feed handshake fails.
    pub async fn subscribe(&self) -> Result<ItemChangeSubscription, SyncError> {
        self.feed
            .subscribe_items()
            .await
            .map_err(SyncError::Subscription)
    }

    /// Apply one change event to the replica, in arrival order.
    pub fn apply(&mut self, event: ChangeEvent) {
        self.replica.apply(event);
    }

    /// Await the next event on the subscription and apply it.
    ///
    /// Returns `Ok(true)` after applying an event and `Ok(false)` when
    /// the feed has closed. On a closed feed the replica stays frozen at
    /// its last consistent state; reconnecting is the caller's call.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Subscription`] if a payload cannot be
    /// decoded. The replica state is unchanged in that case.
    pub async fn apply_next(
        &mut self,
        subscription: &mut ItemChangeSubscription,
    ) -> Result<bool, SyncError> {
        match subscription.next_event().await {
            Ok(Some(event)) => {
                self.replica.apply(event);
                Ok(true)
            }
            Ok(None) => {
                warn!("catalog change feed closed; replica frozen at last state");
                Ok(false)
            }
            Err(e) => Err(SyncError::Subscription(e)),
        }
    }
}

impl std::fmt::Debug for Synchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synchronizer")
            .field("replica_len", &self.replica.len())
            .finish()
    }
}
