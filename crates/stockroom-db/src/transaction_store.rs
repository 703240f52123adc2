//! Atomic batch insertion of committed stock movements.
//!
//! The cart's staged lines become rows in the `transactions` table. The
//! whole batch is wrapped in a single database transaction: either every
//! record is durably recorded or none is. Partial application is never
//! observable, and there is no row-level retry.

use sqlx::PgPool;

use stockroom_types::{MovementType, TransactionRecord};

use crate::error::DbError;

/// Default number of rows per multi-row INSERT statement.
const DEFAULT_BATCH_SIZE: usize = 100;

/// Operations on the `transactions` table.
pub struct TransactionStore<'a> {
    pool: &'a PgPool,
    batch_size: usize,
}

impl<'a> TransactionStore<'a> {
    /// Create a new transaction store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the number of rows per INSERT statement.
    #[must_use]
    pub const fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Insert every record as one atomic batch.
    ///
    /// Rows are written with multi-row UNNEST inserts to keep round-trips
    /// low, but all statements run inside one database transaction that
    /// commits only after the last row is accepted. Any rejection rolls
    /// the entire batch back.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if any insert fails; no rows are
    /// recorded in that case.
    pub async fn insert_all(&self, records: &[TransactionRecord]) -> Result<(), DbError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for chunk in records.chunks(self.batch_size) {
            let len = chunk.len();
            let mut item_ids = Vec::with_capacity(len);
            let mut movements = Vec::with_capacity(len);
            let mut quantities = Vec::with_capacity(len);
            let mut prices = Vec::with_capacity(len);

            for record in chunk {
                item_ids.push(record.item_id.into_inner());
                movements.push(movement_type_to_db(record.movement).to_owned());
                quantities.push(record.quantity);
                prices.push(record.price);
            }

            // Multi-row INSERT using UNNEST for batch efficiency.
            sqlx::query(
                r"INSERT INTO transactions (item_id, transaction_type, quantity, price)
                  SELECT * FROM UNNEST($1::BIGINT[], $2::movement_type[], $3::BIGINT[], $4::BIGINT[])",
            )
            .bind(&item_ids)
            .bind(&movements)
            .bind(&quantities)
            .bind(&prices)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(count = records.len(), "Inserted transactions (batch UNNEST)");
        Ok(())
    }
}

/// Convert a [`MovementType`] to its `PostgreSQL` enum string.
const fn movement_type_to_db(movement: MovementType) -> &'static str {
    match movement {
        MovementType::Sell => "sell",
        MovementType::Buy => "buy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_strings_match_db_enum() {
        assert_eq!(movement_type_to_db(MovementType::Sell), "sell");
        assert_eq!(movement_type_to_db(MovementType::Buy), "buy");
    }
}
