//! Surrogate key allocation
//!
//! The ledger never picks surrogate keys itself; it asks the storage
//! backend's generator. Keys are monotonic and never repeat while the
//! allocating transaction commits. A rolled-back transaction also rolls back
//! its allocation.

use crate::errors::{persistence, Result};
use crate::schema::{SchemaNames, SEQUENCE_ID, SEQUENCE_NEXT_VAL};
use rusqlite::{OptionalExtension, Transaction};
use verso_core::errors::{ExError, ExErrorKind};

/// Generator capability producing commit surrogate keys
pub trait SurrogateKeyGenerator: Send + Sync {
    /// Allocate the next key inside the caller's transaction
    ///
    /// # Errors
    ///
    /// Returns `Persistence` when the backend cannot allocate a key.
    fn next_key(&self, tx: &Transaction<'_>) -> Result<i64>;
}

/// Sequence emulated by a single-row table
///
/// SQLite has no sequences; the row is bumped with `UPDATE ... RETURNING`,
/// which runs under the database write lock.
#[derive(Debug, Clone)]
pub struct SequenceTable {
    table: String,
}

impl SequenceTable {
    pub fn new(names: &SchemaNames) -> Self {
        Self {
            table: names.commit_pk_seq(),
        }
    }
}

impl SurrogateKeyGenerator for SequenceTable {
    fn next_key(&self, tx: &Transaction<'_>) -> Result<i64> {
        let sql = format!(
            "UPDATE {table} SET {next} = {next} + 1 WHERE {id} = 1 RETURNING {next}",
            table = self.table,
            next = SEQUENCE_NEXT_VAL,
            id = SEQUENCE_ID,
        );

        let key: Option<i64> = tx
            .query_row(&sql, [], |row| row.get(0))
            .optional()
            .map_err(|e| persistence("next_surrogate_key", e))?;

        key.ok_or_else(|| {
            ExError::new(ExErrorKind::Persistence)
                .with_op("next_surrogate_key")
                .with_message(format!("Sequence table {} is not initialised", self.table))
        })
    }
}
