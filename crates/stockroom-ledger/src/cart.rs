//! The cart: an ordered sequence of staged stock movements.
//!
//! The [`Cart`] owns the staged lines for a single checkout session. It
//! is constructed when the session starts and destroyed (or cleared) when
//! the session commits or cancels -- it is never shared across sessions.

use rust_decimal::Decimal;

use stockroom_types::{CartLine, ItemId, MovementType, StockSnapshot};

use crate::CartError;

// ---------------------------------------------------------------------------
// Staging parameters
// ---------------------------------------------------------------------------

/// Parameters for staging one stock movement.
///
/// Packs the stage arguments into a single struct for call-site
/// readability.
#[derive(Debug, Clone)]
pub struct StageParams {
    /// The item being moved.
    pub item_id: ItemId,
    /// Item display name, carried on the staged line.
    pub item_name: String,
    /// Units to move; must be at least 1.
    pub quantity: i64,
    /// Price per unit; must be strictly positive.
    pub unit_price: Decimal,
    /// Whether the movement sells from or buys into stock.
    pub movement: MovementType,
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// The staged transaction ledger for one checkout session.
///
/// Lines are appended in staging order and committed as one batch. The
/// cart enforces two invariants at staging time:
/// 1. Quantities are at least 1 and prices strictly positive.
/// 2. A sell never exceeds the snapshot's available quantity.
///
/// The cart is optimistic: accepting a sell does not deduct from the
/// snapshot, so several staged sells against the same item are each
/// validated against the same last-known stock. Their sum can exceed the
/// actual stock; resolving that is deferred to the backing store.
#[derive(Debug, Default)]
pub struct Cart {
    /// Staged lines, in insertion order.
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create a new empty cart.
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Return the number of staged lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Return whether the cart has no staged lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Return all staged lines, in staging order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Validate a movement against the given stock snapshot and append
    /// it to the cart.
    ///
    /// The snapshot must be freshly pulled for the targeted item; the
    /// cart trusts the caller on freshness. Sells are rejected when the
    /// quantity exceeds `snapshot.quantity_in_stock`; buys are not
    /// stock-checked.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if the quantity is below 1,
    /// [`CartError::InvalidPrice`] if the unit price is not strictly
    /// positive, and [`CartError::InsufficientStock`] if a sell exceeds
    /// the available quantity.
    pub fn stage(
        &mut self,
        params: StageParams,
        snapshot: &StockSnapshot,
    ) -> Result<(), CartError> {
        validate_movement(&params, snapshot)?;

        self.lines.push(CartLine {
            item_id: params.item_id,
            item_name: params.item_name,
            quantity: params.quantity,
            unit_price: params.unit_price,
            movement: params.movement,
        });
        Ok(())
    }

    /// Remove the staged line at the given position.
    ///
    /// A position past the end is a silent no-op: callers derive indices
    /// from the current view, and a stale index must not fault the
    /// session.
    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Sum of `quantity * unit_price` over all staged lines.
    ///
    /// Informational only; the committed records carry per-line minor
    /// units, not this total.
    pub fn total_value(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |acc, line| {
            acc.saturating_add(Decimal::from(line.quantity).saturating_mul(line.unit_price))
        })
    }

    /// Empty the cart unconditionally.
    ///
    /// Called after a successful commit or an explicit cancel.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Validate staging parameters against a stock snapshot.
fn validate_movement(params: &StageParams, snapshot: &StockSnapshot) -> Result<(), CartError> {
    if params.quantity < 1 {
        return Err(CartError::InvalidQuantity {
            quantity: params.quantity,
        });
    }

    if params.unit_price <= Decimal::ZERO {
        return Err(CartError::InvalidPrice {
            price: params.unit_price,
        });
    }

    if params.movement == MovementType::Sell && params.quantity > snapshot.quantity_in_stock {
        return Err(CartError::InsufficientStock {
            requested: params.quantity,
            available: snapshot.quantity_in_stock,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn snapshot(quantity: i64) -> StockSnapshot {
        StockSnapshot {
            item_id: ItemId::new(1),
            quantity_in_stock: quantity,
            average_price: 500,
        }
    }

    fn sell(quantity: i64, price: Decimal) -> StageParams {
        StageParams {
            item_id: ItemId::new(1),
            item_name: "Bolt".to_owned(),
            quantity,
            unit_price: price,
            movement: MovementType::Sell,
        }
    }

    fn buy(quantity: i64, price: Decimal) -> StageParams {
        StageParams {
            movement: MovementType::Buy,
            ..sell(quantity, price)
        }
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.total_value(), Decimal::ZERO);
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut cart = Cart::new();
        let result = cart.stage(sell(0, dec!(1.00)), &snapshot(10));
        assert_eq!(result, Err(CartError::InvalidQuantity { quantity: 0 }));
        assert!(cart.is_empty());
    }

    #[test]
    fn negative_quantity_rejected() {
        let mut cart = Cart::new();
        let result = cart.stage(buy(-3, dec!(1.00)), &snapshot(10));
        assert_eq!(result, Err(CartError::InvalidQuantity { quantity: -3 }));
    }

    #[test]
    fn sell_of_entire_stock_accepted() {
        let mut cart = Cart::new();
        let result = cart.stage(sell(10, dec!(2.50)), &snapshot(10));
        assert_eq!(result, Ok(()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn sell_exceeding_stock_rejected() {
        let mut cart = Cart::new();
        let result = cart.stage(sell(11, dec!(2.50)), &snapshot(10));
        assert_eq!(
            result,
            Err(CartError::InsufficientStock {
                requested: 11,
                available: 10,
            }),
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn buy_is_not_stock_checked() {
        let mut cart = Cart::new();
        let result = cart.stage(buy(1_000, dec!(0.50)), &snapshot(0));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn zero_price_rejected() {
        let mut cart = Cart::new();
        let result = cart.stage(sell(1, Decimal::ZERO), &snapshot(10));
        assert_eq!(
            result,
            Err(CartError::InvalidPrice {
                price: Decimal::ZERO,
            }),
        );
    }

    #[test]
    fn negative_price_rejected() {
        let mut cart = Cart::new();
        let result = cart.stage(sell(1, dec!(-0.01)), &snapshot(10));
        assert!(matches!(result, Err(CartError::InvalidPrice { .. })));
    }

    #[test]
    fn one_cent_price_accepted() {
        let mut cart = Cart::new();
        let result = cart.stage(sell(1, dec!(0.01)), &snapshot(10));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn staged_sells_are_validated_independently() {
        // Two staged sells can each pass against the same snapshot even
        // when their sum exceeds stock. This mirrors the shipped
        // behavior; the cart deliberately keeps no running total.
        let mut cart = Cart::new();
        let stock = snapshot(10);
        assert_eq!(cart.stage(sell(7, dec!(1.00)), &stock), Ok(()));
        assert_eq!(cart.stage(sell(7, dec!(1.00)), &stock), Ok(()));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn total_value_sums_lines() {
        let mut cart = Cart::new();
        let stock = snapshot(100);
        let _ = cart.stage(sell(3, dec!(10.00)), &stock);
        let _ = cart.stage(buy(1, dec!(5.50)), &stock);
        assert_eq!(cart.total_value(), dec!(35.50));
    }

    #[test]
    fn total_value_recomputed_after_remove() {
        let mut cart = Cart::new();
        let stock = snapshot(100);
        let _ = cart.stage(sell(3, dec!(10.00)), &stock);
        let _ = cart.stage(buy(1, dec!(5.50)), &stock);
        cart.remove(0);
        assert_eq!(cart.total_value(), dec!(5.50));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut cart = Cart::new();
        let _ = cart.stage(sell(1, dec!(1.00)), &snapshot(10));
        cart.remove(5);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        let _ = cart.stage(sell(1, dec!(1.00)), &snapshot(10));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_value(), Decimal::ZERO);
    }

    #[test]
    fn lines_preserve_staging_order() {
        let mut cart = Cart::new();
        let stock = snapshot(100);
        let _ = cart.stage(sell(1, dec!(1.00)), &stock);
        let _ = cart.stage(buy(2, dec!(2.00)), &stock);
        let movements: Vec<MovementType> =
            cart.lines().iter().map(|line| line.movement).collect();
        assert_eq!(movements, vec![MovementType::Sell, MovementType::Buy]);
    }
}
