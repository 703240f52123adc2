//! Staged transaction ledger (the cart) for the Stockroom subsystem.
//!
//! A [`Cart`] accumulates pending stock movements for one checkout
//! session. Every movement is validated at staging time against a stock
//! snapshot pulled by the caller; accepted lines are held in insertion
//! order until they are committed as one atomic batch or removed.
//!
//! # Design
//!
//! - **Validate-then-append**: a line that fails validation is never held.
//! - **Optimistic**: staged sells do not decrement the snapshot, so each
//!   staged line is checked independently against the last-known stock.
//! - **Precision**: all prices use [`Decimal`] -- no floating point.
//!   Committed records carry integer minor units (price times 100).
//!
//! # Modules
//!
//! - [`cart`] -- The [`Cart`]: ordered staged lines with validation.
//! - [`commit`] -- Conversion of staged lines to wire transaction records.
//!
//! [`Decimal`]: rust_decimal::Decimal

pub mod cart;
pub mod commit;

// Re-export primary types at crate root.
pub use cart::{Cart, StageParams};
pub use commit::transaction_records;

use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Validation failures when staging a movement.
///
/// These are expected user-input outcomes: the caller corrects the input
/// and retries. They are returned synchronously and never logged as
/// system faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// Quantity must be at least 1.
    #[error("quantity must be at least 1, got {quantity}")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
    },

    /// Unit price must be strictly positive.
    #[error("unit price must be greater than zero, got {price}")]
    InvalidPrice {
        /// The rejected price.
        price: Decimal,
    },

    /// A sell would exceed the units available in stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Units requested to sell.
        requested: i64,
        /// Units in stock per the snapshot used for validation.
        available: i64,
    },
}

/// Failures converting a staged unit price into integer minor units.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The price times 100 does not fit in an `i64`.
    #[error("price {price} overflows minor currency units")]
    MinorUnitsOverflow {
        /// The offending unit price.
        price: Decimal,
    },

    /// The price has more than two fractional digits and cannot be
    /// represented exactly in minor units.
    #[error("price {price} is not a whole number of minor currency units")]
    FractionalMinorUnits {
        /// The offending unit price.
        price: Decimal,
    },
}
