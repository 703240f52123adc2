//! Conversion of staged cart lines into wire transaction records.
//!
//! The batch committer boundary: staged lines are mapped to write-once
//! [`TransactionRecord`] values with prices in integer minor units. The
//! mapping does not touch the cart, so a failed commit leaves the staged
//! lines intact for retry.
//!
//! Stock is not re-validated here; validation happened at staging time
//! and the window between staging and commit is accepted as-is.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use stockroom_types::{CartLine, TransactionRecord};

use crate::cart::Cart;
use crate::AmountError;

/// Minor currency units per major unit.
const MINOR_UNITS_PER_MAJOR: Decimal = Decimal::ONE_HUNDRED;

/// Map every staged line to a [`TransactionRecord`], multiplying the unit
/// price into integer minor units.
///
/// The cart itself is not mutated; the caller clears it only after the
/// records have been durably stored.
///
/// # Errors
///
/// Returns [`AmountError::MinorUnitsOverflow`] if a price times 100 does
/// not fit an `i64`, and [`AmountError::FractionalMinorUnits`] if a price
/// carries sub-cent precision that minor units cannot represent.
pub fn transaction_records(cart: &Cart) -> Result<Vec<TransactionRecord>, AmountError> {
    cart.lines().iter().map(to_record).collect()
}

/// Convert one staged line.
fn to_record(line: &CartLine) -> Result<TransactionRecord, AmountError> {
    Ok(TransactionRecord {
        item_id: line.item_id,
        movement: line.movement,
        quantity: line.quantity,
        price: minor_units(line.unit_price)?,
    })
}

/// Convert a major-unit [`Decimal`] price into `i64` minor units.
fn minor_units(price: Decimal) -> Result<i64, AmountError> {
    let scaled = price
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .ok_or(AmountError::MinorUnitsOverflow { price })?;

    if scaled != scaled.trunc() {
        return Err(AmountError::FractionalMinorUnits { price });
    }

    scaled
        .to_i64()
        .ok_or(AmountError::MinorUnitsOverflow { price })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use stockroom_types::{ItemId, MovementType, StockSnapshot};

    use crate::cart::StageParams;

    use super::*;

    fn snapshot(item_id: i64, quantity: i64) -> StockSnapshot {
        StockSnapshot {
            item_id: ItemId::new(item_id),
            quantity_in_stock: quantity,
            average_price: 0,
        }
    }

    fn staged_cart() -> Cart {
        let mut cart = Cart::new();
        let _ = cart.stage(
            StageParams {
                item_id: ItemId::new(1),
                item_name: "Bolt".to_owned(),
                quantity: 3,
                unit_price: dec!(10.00),
                movement: MovementType::Sell,
            },
            &snapshot(1, 10),
        );
        let _ = cart.stage(
            StageParams {
                item_id: ItemId::new(2),
                item_name: "Washer".to_owned(),
                quantity: 1,
                unit_price: dec!(5.50),
                movement: MovementType::Buy,
            },
            &snapshot(2, 0),
        );
        cart
    }

    #[test]
    fn records_carry_minor_units() {
        let cart = staged_cart();
        let records = transaction_records(&cart);
        assert_eq!(
            records,
            Ok(vec![
                TransactionRecord {
                    item_id: ItemId::new(1),
                    movement: MovementType::Sell,
                    quantity: 3,
                    price: 1000,
                },
                TransactionRecord {
                    item_id: ItemId::new(2),
                    movement: MovementType::Buy,
                    quantity: 1,
                    price: 550,
                },
            ]),
        );
    }

    #[test]
    fn conversion_leaves_cart_untouched() {
        let cart = staged_cart();
        let _ = transaction_records(&cart);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn one_cent_converts_to_one_minor_unit() {
        assert_eq!(minor_units(dec!(0.01)), Ok(1));
    }

    #[test]
    fn whole_price_converts() {
        assert_eq!(minor_units(dec!(123)), Ok(12_300));
    }

    #[test]
    fn sub_cent_precision_rejected() {
        let result = minor_units(dec!(0.001));
        assert_eq!(
            result,
            Err(AmountError::FractionalMinorUnits {
                price: dec!(0.001),
            }),
        );
    }

    #[test]
    fn overflowing_price_rejected() {
        let result = minor_units(Decimal::MAX);
        assert!(matches!(result, Err(AmountError::MinorUnitsOverflow { .. })));
    }

    #[test]
    fn empty_cart_yields_no_records() {
        let cart = Cart::new();
        assert_eq!(transaction_records(&cart), Ok(Vec::new()));
    }
}
