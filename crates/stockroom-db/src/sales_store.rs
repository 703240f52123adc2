//! Sales reporting aggregates.
//!
//! Two server-side reporting functions, consumed as-is: total sales per
//! item and per category over an inclusive date range. The core never
//! recomputes these aggregates; it only decodes the rows.

use sqlx::PgPool;

use stockroom_types::{DateRange, SalesByCategory, SalesByItem};

use crate::error::DbError;

/// Read-only sales reporting queries.
pub struct SalesStore<'a> {
    pool: &'a PgPool,
}

impl<'a> SalesStore<'a> {
    /// Create a new sales store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Total sales per item name over the given date range.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn sales_by_item(&self, range: DateRange) -> Result<Vec<SalesByItem>, DbError> {
        let rows = sqlx::query_as::<_, SalesByItemRow>(
            r"SELECT name, total_sales
              FROM get_total_sales_by_name($1, $2)",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SalesByItem {
                name: row.name,
                total_sales: row.total_sales,
            })
            .collect())
    }

    /// Total sales per category over the given date range.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn sales_by_category(
        &self,
        range: DateRange,
    ) -> Result<Vec<SalesByCategory>, DbError> {
        let rows = sqlx::query_as::<_, SalesByCategoryRow>(
            r"SELECT category, total_sales
              FROM get_total_sales_by_date_range($1, $2)",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SalesByCategory {
                category: row.category,
                total_sales: row.total_sales,
            })
            .collect())
    }
}

/// A row from the `get_total_sales_by_name` aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
struct SalesByItemRow {
    name: String,
    total_sales: i64,
}

/// A row from the `get_total_sales_by_date_range` aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
struct SalesByCategoryRow {
    category: String,
    total_sales: i64,
}
