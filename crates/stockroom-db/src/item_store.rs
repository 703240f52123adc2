//! Catalog item operations: full fetch, search, and mutations.
//!
//! The `items` table is the authoritative catalog. The replica performs
//! its initial full fetch here; incremental consistency afterwards comes
//! from the change feed, not from re-querying this store.
//!
//! Mutations do not publish change notifications themselves. The
//! producing collaborator publishes the matching [`ChangeEvent`] through
//! [`ChangeFeed`] after a mutation succeeds, mirroring how the
//! authoritative store drives its realtime channel.
//!
//! [`ChangeEvent`]: stockroom_types::ChangeEvent
//! [`ChangeFeed`]: crate::feed::ChangeFeed

use sqlx::PgPool;

use stockroom_types::{Item, ItemId};

use crate::error::DbError;

/// Default result cap for catalog searches.
const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Operations on the `items` table.
pub struct ItemStore<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemStore<'a> {
    /// Create a new item store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the entire catalog, ordered by id.
    ///
    /// This is the replica's initial full snapshot. The result is a
    /// consistent point-in-time read; events observed on the change feed
    /// afterwards are applied on top of it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_all(&self) -> Result<Vec<Item>, DbError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"SELECT id, name, category
              FROM items
              ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "Fetched full catalog");
        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Search the catalog by name or id.
    ///
    /// A query that parses as an integer matches the exact id; any other
    /// query matches item names case-insensitively as a substring. At
    /// most `limit` rows are returned (defaults to 10 when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn search(&self, query: &str, limit: Option<i64>) -> Result<Vec<Item>, DbError> {
        let cap = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

        let rows = if let Ok(id) = query.trim().parse::<i64>() {
            sqlx::query_as::<_, ItemRow>(
                r"SELECT id, name, category
                  FROM items
                  WHERE id = $1
                  LIMIT $2",
            )
            .bind(id)
            .bind(cap)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as::<_, ItemRow>(
                r"SELECT id, name, category
                  FROM items
                  WHERE name ILIKE '%' || $1 || '%'
                  ORDER BY id
                  LIMIT $2",
            )
            .bind(query)
            .bind(cap)
            .fetch_all(self.pool)
            .await?
        };

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Insert a new catalog item and return the stored record with its
    /// assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, name: &str, category: &str) -> Result<Item, DbError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"INSERT INTO items (name, category)
              VALUES ($1, $2)
              RETURNING id, name, category",
        )
        .bind(name)
        .bind(category)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(id = row.id, "Inserted catalog item");
        Ok(row.into())
    }

    /// Update an existing item's name and category, returning the stored
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no item has the given id.
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn update(&self, id: ItemId, name: &str, category: &str) -> Result<Item, DbError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"UPDATE items
              SET name = $2, category = $3
              WHERE id = $1
              RETURNING id, name, category",
        )
        .bind(id.into_inner())
        .bind(name)
        .bind(category)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound(id))?;

        tracing::debug!(id = row.id, "Updated catalog item");
        Ok(row.into())
    }

    /// Delete an item from the catalog.
    ///
    /// Deleting an id that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete(&self, id: ItemId) -> Result<(), DbError> {
        let result = sqlx::query(r"DELETE FROM items WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        tracing::debug!(
            id = id.into_inner(),
            deleted = result.rows_affected(),
            "Deleted catalog item"
        );
        Ok(())
    }
}

/// A row from the `items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemRow {
    /// Store-assigned key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Category label.
    pub category: String,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: ItemId::new(row.id),
            name: row.name,
            category: row.category,
        }
    }
}
