//! Core entity structs for the Stockroom inventory subsystem.
//!
//! Catalog records, stock aggregates, cart lines, committed transaction
//! records, the change feed payload, and the reporting row shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::MovementType;
use crate::ids::ItemId;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A catalog item: the canonical record mirrored by the local replica.
///
/// Items are created, updated, and deleted only through the backing store;
/// the replica observes those mutations through the change feed and never
/// originates an item itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Item {
    /// Store-assigned unique key.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-form category label used by the reporting queries.
    pub category: String,
}

/// One insert/update/delete notification from the catalog change feed.
///
/// Events carry the full post-image for inserts and updates and only the
/// key for deletes. They are transient: consumed by the replica in arrival
/// order and discarded after application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ChangeEvent {
    /// A new item appeared in the catalog.
    Inserted(Item),
    /// An existing item's fields changed.
    Updated(Item),
    /// An item was removed from the catalog.
    Deleted(ItemId),
}

impl ChangeEvent {
    /// Return the item id this event affects.
    pub const fn item_id(&self) -> ItemId {
        match self {
            Self::Inserted(item) | Self::Updated(item) => item.id,
            Self::Deleted(id) => *id,
        }
    }
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

/// Point-in-time stock aggregate for a single item.
///
/// Computed server-side from the committed transaction history; there is
/// no incremental feed for it. A snapshot is immutable once returned --
/// callers needing fresher data must pull a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StockSnapshot {
    /// The item this snapshot describes.
    pub item_id: ItemId,
    /// Units currently in stock (buys minus sells), never negative.
    pub quantity_in_stock: i64,
    /// Quantity-weighted average purchase price in minor currency units.
    pub average_price: i64,
}

/// One row of the full stock listing: a [`StockSnapshot`] joined with the
/// item name for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StockLevel {
    /// The item this row describes.
    pub item_id: ItemId,
    /// Item display name.
    pub name: String,
    /// Units currently in stock.
    pub quantity_in_stock: i64,
    /// Average purchase price in minor currency units.
    pub average_price: i64,
}

// ---------------------------------------------------------------------------
// Cart and transactions
// ---------------------------------------------------------------------------

/// A staged, not-yet-committed stock movement held by a cart.
///
/// Lines are validated at staging time and destroyed on commit or
/// explicit removal. The unit price is a [`Decimal`] in major currency
/// units with at most two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CartLine {
    /// The item being moved.
    pub item_id: ItemId,
    /// Item name at staging time, kept for display.
    pub item_name: String,
    /// Units moved, at least 1.
    pub quantity: i64,
    /// Price per unit, strictly positive.
    #[ts(as = "String")]
    pub unit_price: Decimal,
    /// Whether this line sells from or buys into stock.
    pub movement: MovementType,
}

/// The wire/storage form of a committed stock movement.
///
/// Produced from a [`CartLine`] at commit time with the unit price
/// multiplied into integer minor units. Write-once: never mutated after
/// creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TransactionRecord {
    /// The item moved.
    pub item_id: ItemId,
    /// Movement direction.
    pub movement: MovementType,
    /// Units moved.
    pub quantity: i64,
    /// Price per unit in minor currency units (unit price times 100).
    pub price: i64,
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// An inclusive date window for the reporting queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DateRange {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

/// Total sales for one item over a date range, as returned by the
/// server-side aggregate. Consumed as-is; the core never recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SalesByItem {
    /// Item display name.
    pub name: String,
    /// Summed sale value in minor currency units.
    pub total_sales: i64,
}

/// Total sales for one category over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SalesByCategory {
    /// Category label.
    pub category: String,
    /// Summed sale value in minor currency units.
    pub total_sales: i64,
}
