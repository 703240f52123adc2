//! Stock snapshot queries.
//!
//! Stock is a query-computed aggregate over the committed transaction
//! history, not a stored row: quantity in stock is buys minus sells, and
//! the average price is the quantity-weighted mean of buy prices in minor
//! units. There is no incremental feed for it -- every caller needing
//! current stock pulls a fresh snapshot here.

use sqlx::PgPool;

use stockroom_types::{ItemId, StockLevel, StockSnapshot};

use crate::error::DbError;

/// Read-only stock aggregate queries.
pub struct StockStore<'a> {
    pool: &'a PgPool,
}

impl<'a> StockStore<'a> {
    /// Create a new stock store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Pull a fresh stock snapshot for one item.
    ///
    /// An item that exists but has no recorded movements yet reports
    /// zero quantity and zero average price; only a missing item is an
    /// error. The returned snapshot is immutable -- callers must re-pull
    /// rather than refresh it in place.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the item does not exist.
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn item_stock(&self, item_id: ItemId) -> Result<StockSnapshot, DbError> {
        let row = sqlx::query_as::<_, StockRow>(
            r"SELECT item_id, quantity_in_stock, average_price
              FROM get_item_stock_by_id($1)",
        )
        .bind(item_id.into_inner())
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound(item_id))?;

        Ok(StockSnapshot {
            item_id: ItemId::new(row.item_id),
            quantity_in_stock: row.quantity_in_stock,
            average_price: row.average_price,
        })
    }

    /// Fetch the stock listing for every item with units in stock.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn items_in_stock(&self) -> Result<Vec<StockLevel>, DbError> {
        let rows = sqlx::query_as::<_, StockLevelRow>(
            r"SELECT item_id, name, quantity_in_stock, average_price
              FROM get_items_in_stock()",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| StockLevel {
                item_id: ItemId::new(row.item_id),
                name: row.name,
                quantity_in_stock: row.quantity_in_stock,
                average_price: row.average_price,
            })
            .collect())
    }
}

/// A row from the `get_item_stock_by_id` aggregate.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
struct StockRow {
    item_id: i64,
    quantity_in_stock: i64,
    average_price: i64,
}

/// A row from the `get_items_in_stock` aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
struct StockLevelRow {
    item_id: i64,
    name: String,
    quantity_in_stock: i64,
    average_price: i64,
}
