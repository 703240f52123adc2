//! The checkout session: staging against live stock, committing as one
//! batch.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info};

use stockroom_db::{StockStore, TransactionStore};
use stockroom_ledger::cart::{Cart, StageParams};
use stockroom_ledger::commit::transaction_records;
use stockroom_types::CartLine;

use crate::CheckoutError;

/// One checkout session over one cart.
///
/// Created when the operator opens a checkout and dropped (or cancelled)
/// when they are done. Every stage call pulls a fresh stock snapshot for
/// the targeted item; the cart never validates against cached stock.
///
/// Commit does not re-validate stock. Validation happened at staging time
/// and the window between staging and commit is accepted as-is.
pub struct Checkout {
    pool: PgPool,
    cart: Cart,
}

impl Checkout {
    /// Open a new session with an empty cart.
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cart: Cart::new(),
        }
    }

    /// Return all staged lines, in staging order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Return the number of staged lines.
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Return whether the session has no staged lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Informational sum of `quantity * unit_price` over staged lines.
    pub fn total_value(&self) -> Decimal {
        self.cart.total_value()
    }

    /// Pull a fresh stock snapshot for the item and stage the movement.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Stock`] if the snapshot cannot be pulled
    /// (including an unknown item) and [`CheckoutError::Validation`] if
    /// the cart rejects the movement. The cart is unchanged on any error.
    pub async fn stage(&mut self, params: StageParams) -> Result<(), CheckoutError> {
        let snapshot = StockStore::new(&self.pool)
            .item_stock(params.item_id)
            .await
            .map_err(CheckoutError::Stock)?;

        debug!(
            item_id = %params.item_id,
            quantity = params.quantity,
            in_stock = snapshot.quantity_in_stock,
            "staging movement against fresh snapshot"
        );
        self.cart.stage(params, &snapshot)?;
        Ok(())
    }

    /// Remove the staged line at the given position.
    ///
    /// A stale index past the end is a silent no-op.
    pub fn remove(&mut self, index: usize) {
        self.cart.remove(index);
    }

    /// Discard every staged line without committing.
    pub fn cancel(&mut self) {
        self.cart.clear();
    }

    /// Commit every staged line as one atomic batch.
    ///
    /// All lines are written or none are. The cart is cleared only after
    /// the write succeeds; on any error the staged lines stay in place
    /// for retry. An empty cart commits trivially without touching the
    /// store.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Amount`] if a price cannot be converted
    /// to minor units and [`CheckoutError::Commit`] if the batch write
    /// fails.
    pub async fn commit(&mut self) -> Result<usize, CheckoutError> {
        if self.cart.is_empty() {
            return Ok(0);
        }

        let records = transaction_records(&self.cart)?;

        TransactionStore::new(&self.pool)
            .insert_all(&records)
            .await
            .map_err(CheckoutError::Commit)?;

        let committed = records.len();
        self.cart.clear();
        info!(records = committed, "checkout committed");
        Ok(committed)
    }
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("staged_lines", &self.cart.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lazy_pool() -> Option<PgPool> {
        // Lazy pools defer connecting until first use, so pure session
        // behavior is testable without a database.
        PgPool::connect_lazy("postgresql://stockroom@localhost:5432/stockroom").ok()
    }

    #[tokio::test]
    async fn new_session_is_empty() {
        let Some(pool) = lazy_pool() else { return };
        let session = Checkout::new(pool);
        assert!(session.is_empty());
        assert_eq!(session.len(), 0);
        assert_eq!(session.total_value(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn committing_empty_cart_writes_nothing() {
        let Some(pool) = lazy_pool() else { return };
        let mut session = Checkout::new(pool);
        // Never reaches the store; a lazy pool with no server would fail.
        let committed = session.commit().await;
        assert!(matches!(committed, Ok(0)));
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn cancel_on_empty_session_is_noop() {
        let Some(pool) = lazy_pool() else { return };
        let mut session = Checkout::new(pool);
        session.cancel();
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn remove_on_empty_session_is_noop() {
        let Some(pool) = lazy_pool() else { return };
        let mut session = Checkout::new(pool);
        session.remove(0);
        assert!(session.is_empty());
    }
}
