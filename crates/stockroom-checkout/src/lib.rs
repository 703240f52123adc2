//! Checkout sessions for the Stockroom inventory subsystem.
//!
//! A [`Checkout`] ties one cart to the backing store: every staged
//! movement is validated against a stock snapshot pulled fresh at that
//! moment, and commit hands the whole cart to the batch committer as one
//! atomic write. Each session owns its cart outright; nothing is shared
//! between concurrent sessions.
//!
//! # Failure model
//!
//! Staging and commit are both all-or-nothing from the session's point of
//! view: a rejected movement leaves the cart as it was, and a failed
//! commit leaves every staged line in place for retry.

pub mod session;

// Re-export primary types at crate root.
pub use session::Checkout;

use stockroom_db::DbError;
use stockroom_ledger::{AmountError, CartError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during a checkout session.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The movement failed cart validation; nothing was staged.
    #[error("movement rejected: {0}")]
    Validation(#[from] CartError),

    /// The stock snapshot for the targeted item could not be pulled.
    #[error("stock snapshot unavailable: {0}")]
    Stock(#[source] DbError),

    /// A staged price could not be converted to integer minor units.
    #[error("amount conversion failed: {0}")]
    Amount(#[from] AmountError),

    /// The batch write failed; every staged line remains in the cart.
    #[error("commit failed: {0}")]
    Commit(#[source] DbError),
}
