use crate::codec::{commit_id_key, timestamp};
use crate::errors::{is_unique_violation, persistence, Result};
use crate::schema::{
    SchemaNames, COMMIT_AUTHOR, COMMIT_COMMIT_DATE, COMMIT_COMMIT_ID, COMMIT_COMMIT_ID_KEY,
    COMMIT_PK, COMMIT_PROPERTY_COMMIT_FK, COMMIT_PROPERTY_NAME, COMMIT_PROPERTY_VALUE,
};
use crate::sequence::{SequenceTable, SurrogateKeyGenerator};
use chrono::NaiveDateTime;
use rusqlite::{Connection, Transaction};
use std::time::Instant;
use verso_core::errors::{ExError, LedgerError};
use verso_core::{log_op_end, log_op_error, log_op_start, CommitId, CommitMetadata};

const OP_SAVE: &str = "commit_save";

/// Commit metadata ledger over SQLite
#[derive(Debug, Clone)]
pub struct CommitLedgerStore<G = SequenceTable> {
    pub(super) names: SchemaNames,
    generator: G,
}

impl CommitLedgerStore<SequenceTable> {
    /// Ledger using the table-backed sequence for surrogate keys
    pub fn new(names: SchemaNames) -> Self {
        let generator = SequenceTable::new(&names);
        Self { names, generator }
    }
}

impl Default for CommitLedgerStore<SequenceTable> {
    fn default() -> Self {
        Self::new(SchemaNames::default())
    }
}

impl<G: SurrogateKeyGenerator> CommitLedgerStore<G> {
    /// Ledger using a caller-supplied surrogate key generator
    pub fn with_generator(names: SchemaNames, generator: G) -> Self {
        Self { names, generator }
    }

    pub fn names(&self) -> &SchemaNames {
        &self.names
    }

    /// Persist a commit and its properties, returning the commit's surrogate key.
    ///
    /// Properties are inserted in iteration order. Repeated names are stored
    /// as separate rows.
    ///
    /// # Errors
    ///
    /// - `DuplicateCommit`: a commit with `commit_id` already exists. When the
    ///   pre-check finds it nothing is written. When the UNIQUE constraint
    ///   catches it (another writer committed it after the pre-check) a
    ///   surrogate key has already been drawn from the sequence, so the caller
    ///   must roll back as for any other error
    /// - `ConstraintViolation`: another key constraint rejected a row, e.g. a
    ///   generator handed out a key twice
    /// - `Persistence` / `Timeout`: the backend failed
    ///
    /// Any error leaves the transaction unusable for this commit; roll it back
    /// to discard partial writes.
    pub fn save<I, K, V>(
        &self,
        author: &str,
        properties: I,
        date: NaiveDateTime,
        commit_id: &CommitId,
        tx: &Transaction<'_>,
    ) -> Result<i64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        log_op_start!(OP_SAVE, commit_id = %commit_id, author = author);
        let start = Instant::now();

        let result = self
            .save_impl(author, properties, date, commit_id, tx)
            .map_err(|e| {
                log_op_error!(
                    OP_SAVE,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    commit_id = %commit_id
                );
                e
            })?;

        log_op_end!(
            OP_SAVE,
            duration_ms = start.elapsed().as_millis() as u64,
            commit_id = %commit_id,
            surrogate_key = result
        );

        Ok(result)
    }

    /// Persist a `CommitMetadata` value; see [`CommitLedgerStore::save`]
    pub fn save_metadata(&self, metadata: &CommitMetadata, tx: &Transaction<'_>) -> Result<i64> {
        self.save(
            &metadata.author,
            metadata
                .properties
                .iter()
                .map(|p| (p.name.as_str(), p.value.as_str())),
            metadata.commit_date,
            &metadata.commit_id,
            tx,
        )
    }

    fn save_impl<I, K, V>(
        &self,
        author: &str,
        properties: I,
        date: NaiveDateTime,
        commit_id: &CommitId,
        tx: &Transaction<'_>,
    ) -> Result<i64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if self.is_commit_persisted(commit_id, tx)? {
            return Err(duplicate_commit(commit_id));
        }

        let commit_pk = self.insert_commit(author, date, commit_id, tx)?;
        let property_count = self.insert_commit_properties(commit_pk, properties, tx)?;

        tracing::debug!(
            commit_id = %commit_id,
            surrogate_key = commit_pk,
            property_count = property_count,
            "Inserted commit rows"
        );

        Ok(commit_pk)
    }

    fn insert_commit(
        &self,
        author: &str,
        date: NaiveDateTime,
        commit_id: &CommitId,
        tx: &Transaction<'_>,
    ) -> Result<i64> {
        let commit_pk = self.generator.next_key(tx)?;

        let sql = format!(
            "INSERT INTO {table} ({pk}, {author}, {date}, {id}, {key}) VALUES (?1, ?2, ?3, ?4, ?5)",
            table = self.names.commit_table(),
            pk = COMMIT_PK,
            author = COMMIT_AUTHOR,
            date = COMMIT_COMMIT_DATE,
            id = COMMIT_COMMIT_ID,
            key = COMMIT_COMMIT_ID_KEY,
        );

        tx.execute(
            &sql,
            rusqlite::params![
                commit_pk,
                author,
                timestamp::to_storage(&date),
                commit_id.to_string(),
                commit_id_key::encode(commit_id),
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e, COMMIT_COMMIT_ID_KEY) {
                duplicate_commit(commit_id).with_message("Commit id rejected by uniqueness constraint")
            } else {
                persistence(OP_SAVE, e).with_entity_id(commit_id.to_string())
            }
        })?;

        Ok(commit_pk)
    }

    fn insert_commit_properties<I, K, V>(
        &self,
        commit_pk: i64,
        properties: I,
        tx: &Transaction<'_>,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let sql = format!(
            "INSERT INTO {table} ({fk}, {name}, {value}) VALUES (?1, ?2, ?3)",
            table = self.names.commit_property_table(),
            fk = COMMIT_PROPERTY_COMMIT_FK,
            name = COMMIT_PROPERTY_NAME,
            value = COMMIT_PROPERTY_VALUE,
        );
        let mut stmt = tx
            .prepare_cached(&sql)
            .map_err(|e| persistence(OP_SAVE, e))?;

        let mut count = 0;
        for (name, value) in properties {
            stmt.execute(rusqlite::params![commit_pk, name.as_ref(), value.as_ref()])
                .map_err(|e| persistence(OP_SAVE, e))?;
            count += 1;
        }
        Ok(count)
    }

    /// Whether a commit with exactly this identifier is persisted
    ///
    /// Identifiers compare numerically, so `1.5` and `1.50` are the same commit.
    pub fn is_commit_persisted(&self, commit_id: &CommitId, conn: &Connection) -> Result<bool> {
        let sql = format!(
            "SELECT COUNT(*) FROM {table} WHERE {key} = ?1",
            table = self.names.commit_table(),
            key = COMMIT_COMMIT_ID_KEY,
        );
        let count: i64 = conn
            .query_row(&sql, [commit_id_key::encode(commit_id)], |row| row.get(0))
            .map_err(|e| persistence("is_commit_persisted", e))?;

        Ok(count > 0)
    }

    /// Highest persisted commit id, or `None` when the ledger is empty
    pub fn head_commit_id(&self, conn: &Connection) -> Result<Option<CommitId>> {
        let sql = format!(
            "SELECT MAX({key}) FROM {table}",
            table = self.names.commit_table(),
            key = COMMIT_COMMIT_ID_KEY,
        );
        let max_key: Option<String> = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| persistence("head_commit_id", e))?;

        max_key.as_deref().map(commit_id_key::decode).transpose()
    }
}

fn duplicate_commit(commit_id: &CommitId) -> ExError {
    ExError::from(LedgerError::DuplicateCommit {
        commit_id: commit_id.to_string(),
    })
    .with_op(OP_SAVE)
}
