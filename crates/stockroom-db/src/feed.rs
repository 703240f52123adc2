//! NATS client for the catalog change feed.
//!
//! The authoritative store publishes one message per catalog mutation on
//! subjects under `items.`: `items.inserted`, `items.updated`, and
//! `items.deleted`, each carrying a serde-encoded [`ChangeEvent`]. A
//! subscription to `items.*` observes every mutation in publish order on
//! a single timeline.
//!
//! Payloads are decoded into the typed [`ChangeEvent`] schema at this
//! boundary; no untyped JSON crosses into the replica.

use futures::StreamExt;
use tracing::{debug, info};

use stockroom_types::ChangeEvent;

use crate::error::DbError;

/// Subject for insert notifications.
const SUBJECT_INSERTED: &str = "items.inserted";

/// Subject for update notifications.
const SUBJECT_UPDATED: &str = "items.updated";

/// Subject for delete notifications.
const SUBJECT_DELETED: &str = "items.deleted";

/// Wildcard matching every catalog change subject.
const SUBJECT_ALL: &str = "items.*";

/// NATS client wrapper for the catalog change feed.
///
/// Manages a single NATS connection and provides scoped subscriptions to
/// the item change subjects plus the publishing side used by the
/// producing collaborator.
///
/// Cloning shares the underlying connection.
#[derive(Clone)]
pub struct ChangeFeed {
    client: async_nats::Client,
}

impl ChangeFeed {
    /// Connect to a NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Feed`] if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        info!(url = url, "connecting to NATS server");
        let client = async_nats::connect(url)
            .await
            .map_err(|e| DbError::Feed(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }

    /// Load the feed URL from the `FEED_URL` environment variable and
    /// connect.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the variable is not set and
    /// [`DbError::Feed`] if the connection fails.
    pub async fn connect_from_env() -> Result<Self, DbError> {
        let url = std::env::var("FEED_URL")
            .map_err(|_| DbError::Config("FEED_URL is not set".to_owned()))?;
        Self::connect(&url).await
    }

    /// Open a subscription covering every catalog change subject.
    ///
    /// The returned handle is a scoped resource: call
    /// [`ItemChangeSubscription::unsubscribe`] on the way out, or rely on
    /// dropping the handle to remove the server-side interest.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Feed`] if the subscription fails.
    pub async fn subscribe_items(&self) -> Result<ItemChangeSubscription, DbError> {
        debug!(subject = SUBJECT_ALL, "subscribing to catalog changes");
        let subscriber = self
            .client
            .subscribe(SUBJECT_ALL)
            .await
            .map_err(|e| DbError::Feed(format!("failed to subscribe to {SUBJECT_ALL}: {e}")))?;
        info!("subscribed to catalog change subjects");
        Ok(ItemChangeSubscription { subscriber })
    }

    /// Publish one change event on its kind-specific subject.
    ///
    /// Used by the producing collaborator after a successful catalog
    /// mutation.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if encoding fails and
    /// [`DbError::Feed`] if publishing fails.
    pub async fn publish(&self, event: &ChangeEvent) -> Result<(), DbError> {
        let subject = Self::subject_for(event);
        let payload = serde_json::to_vec(event)?;
        debug!(
            subject = subject,
            item_id = %event.item_id(),
            "publishing catalog change"
        );
        self.client
            .publish(subject, payload.into())
            .await
            .map_err(|e| DbError::Feed(format!("failed to publish to {subject}: {e}")))?;
        Ok(())
    }

    /// Return the subject a change event is published on.
    pub const fn subject_for(event: &ChangeEvent) -> &'static str {
        match event {
            ChangeEvent::Inserted(_) => SUBJECT_INSERTED,
            ChangeEvent::Updated(_) => SUBJECT_UPDATED,
            ChangeEvent::Deleted(_) => SUBJECT_DELETED,
        }
    }

    /// Decode a feed payload into a [`ChangeEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if the payload is not a valid
    /// encoded event.
    pub fn decode_event(data: &[u8]) -> Result<ChangeEvent, DbError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Flush all pending messages to the NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Feed`] if the flush operation fails.
    pub async fn flush(&self) -> Result<(), DbError> {
        self.client
            .flush()
            .await
            .map_err(|e| DbError::Feed(format!("flush failed: {e}")))
    }
}

impl std::fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("connected", &true)
            .finish()
    }
}

/// A live subscription to the catalog change subjects.
///
/// Events arrive in publish order on one timeline. The subscription is a
/// scoped resource: it must not outlive the consuming scope, so tear it
/// down with [`unsubscribe`] on every exit path (dropping the handle also
/// removes the interest, just without confirmation).
///
/// [`unsubscribe`]: ItemChangeSubscription::unsubscribe
pub struct ItemChangeSubscription {
    subscriber: async_nats::Subscriber,
}

impl ItemChangeSubscription {
    /// Await the next change event.
    ///
    /// Returns `Ok(None)` when the feed has closed (connection lost or
    /// unsubscribed elsewhere). The caller decides whether to resubscribe;
    /// this handle never retries on its own.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if a payload cannot be decoded.
    pub async fn next_event(&mut self) -> Result<Option<ChangeEvent>, DbError> {
        match self.subscriber.next().await {
            Some(message) => ChangeFeed::decode_event(&message.payload).map(Some),
            None => Ok(None),
        }
    }

    /// Tear down the subscription, removing the server-side interest.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Feed`] if the unsubscribe fails.
    pub async fn unsubscribe(mut self) -> Result<(), DbError> {
        self.subscriber
            .unsubscribe()
            .await
            .map_err(|e| DbError::Feed(format!("unsubscribe failed: {e}")))
    }
}

impl std::fmt::Debug for ItemChangeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemChangeSubscription").finish()
    }
}

#[cfg(test)]
mod tests {
    use stockroom_types::{Item, ItemId};

    use super::*;

    fn item(id: i64) -> Item {
        Item {
            id: ItemId::new(id),
            name: "Bolt".to_owned(),
            category: "Hardware".to_owned(),
        }
    }

    #[test]
    fn subjects_cover_every_event_kind() {
        assert_eq!(
            ChangeFeed::subject_for(&ChangeEvent::Inserted(item(1))),
            "items.inserted"
        );
        assert_eq!(
            ChangeFeed::subject_for(&ChangeEvent::Updated(item(1))),
            "items.updated"
        );
        assert_eq!(
            ChangeFeed::subject_for(&ChangeEvent::Deleted(ItemId::new(1))),
            "items.deleted"
        );
    }

    #[test]
    fn decode_valid_event() {
        let event = ChangeEvent::Updated(item(3));
        let payload = serde_json::to_vec(&event).unwrap_or_default();
        let decoded = ChangeFeed::decode_event(&payload);
        assert_eq!(decoded.ok(), Some(event));
    }

    #[test]
    fn decode_invalid_payload_fails() {
        let result = ChangeFeed::decode_event(b"not valid json");
        assert!(result.is_err());
    }

    #[test]
    fn decoded_subject_roundtrip() {
        // An event published on its own subject decodes back unchanged.
        let event = ChangeEvent::Deleted(ItemId::new(9));
        let payload = serde_json::to_vec(&event).unwrap_or_default();
        let decoded = ChangeFeed::decode_event(&payload).ok();
        assert_eq!(
            decoded.as_ref().map(ChangeFeed::subject_for),
            Some("items.deleted"),
        );
    }

    // Integration tests that require a live NATS server are marked #[ignore].
    #[tokio::test]
    #[ignore = "requires live NATS instance (docker compose up -d)"]
    async fn connect_to_nats() {
        let result = ChangeFeed::connect("nats://localhost:4222").await;
        assert!(result.is_ok());
    }
}
