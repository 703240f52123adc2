//! Enumeration types for the Stockroom inventory subsystem.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The direction of a stock movement.
///
/// A `Sell` removes units from stock; a `Buy` adds units. The direction
/// determines which validation rules apply at staging time: only sells
/// are checked against the available quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum MovementType {
    /// Units leave the stock (a sale).
    Sell,
    /// Units enter the stock (a purchase).
    Buy,
}
