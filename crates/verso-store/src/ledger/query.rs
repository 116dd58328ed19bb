//! Read-only ledger queries
//!
//! None of these mutate state; they accept any connection, including an
//! open transaction, and see that transaction's uncommitted writes.

use super::CommitLedgerStore;
use crate::codec::{commit_id_key, timestamp};
use crate::errors::{persistence, Result};
use crate::schema::{
    COMMIT_AUTHOR, COMMIT_COMMIT_DATE, COMMIT_COMMIT_ID_KEY, COMMIT_PK, COMMIT_PROPERTY_COMMIT_FK,
    COMMIT_PROPERTY_NAME, COMMIT_PROPERTY_PK, COMMIT_PROPERTY_VALUE,
};
use crate::sequence::SurrogateKeyGenerator;
use rusqlite::{Connection, OptionalExtension};
use verso_core::{CommitId, CommitMetadata, CommitProperty, CommitRecord};

/// Raw commit row before decoding
struct CommitRow {
    commit_pk: i64,
    author: String,
    commit_date: i64,
    commit_id_key: String,
}

fn row_to_commit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommitRow> {
    Ok(CommitRow {
        commit_pk: row.get(0)?,
        author: row.get(1)?,
        commit_date: row.get(2)?,
        commit_id_key: row.get(3)?,
    })
}

impl<G: SurrogateKeyGenerator> CommitLedgerStore<G> {
    fn commit_columns(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            COMMIT_PK, COMMIT_AUTHOR, COMMIT_COMMIT_DATE, COMMIT_COMMIT_ID_KEY
        )
    }

    /// Load a commit and its properties by commit id
    ///
    /// Returns `None` if no such commit is persisted.
    pub fn find_commit(&self, commit_id: &CommitId, conn: &Connection) -> Result<Option<CommitRecord>> {
        let sql = format!(
            "SELECT {columns} FROM {table} WHERE {key} = ?1",
            columns = self.commit_columns(),
            table = self.names.commit_table(),
            key = COMMIT_COMMIT_ID_KEY,
        );
        let row = conn
            .query_row(&sql, [commit_id_key::encode(commit_id)], row_to_commit_row)
            .optional()
            .map_err(|e| persistence("find_commit", e))?;

        row.map(|row| self.hydrate(row, conn)).transpose()
    }

    /// Properties of the commit with the given surrogate key, in insertion order
    pub fn find_properties(&self, surrogate_key: i64, conn: &Connection) -> Result<Vec<CommitProperty>> {
        let sql = format!(
            "SELECT {name}, {value} FROM {table} WHERE {fk} = ?1 ORDER BY {pk}",
            name = COMMIT_PROPERTY_NAME,
            value = COMMIT_PROPERTY_VALUE,
            table = self.names.commit_property_table(),
            fk = COMMIT_PROPERTY_COMMIT_FK,
            pk = COMMIT_PROPERTY_PK,
        );
        let mut stmt = conn
            .prepare_cached(&sql)
            .map_err(|e| persistence("find_properties", e))?;

        let properties: std::result::Result<Vec<_>, _> = stmt
            .query_map([surrogate_key], |row| {
                Ok(CommitProperty {
                    name: row.get(0)?,
                    value: row.get(1)?,
                })
            })
            .map_err(|e| persistence("find_properties", e))?
            .collect();

        properties.map_err(|e| persistence("find_properties", e))
    }

    /// Commits ordered from the highest commit id down
    ///
    /// `limit = None` returns every commit.
    pub fn list_commits(&self, limit: Option<usize>, conn: &Connection) -> Result<Vec<CommitRecord>> {
        let sql = format!(
            "SELECT {columns} FROM {table} ORDER BY {key} DESC LIMIT ?1",
            columns = self.commit_columns(),
            table = self.names.commit_table(),
            key = COMMIT_COMMIT_ID_KEY,
        );
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit
            .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
            .unwrap_or(-1);

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| persistence("list_commits", e))?;
        let rows: std::result::Result<Vec<_>, _> = stmt
            .query_map([limit], row_to_commit_row)
            .map_err(|e| persistence("list_commits", e))?
            .collect();
        let rows = rows.map_err(|e| persistence("list_commits", e))?;

        rows.into_iter().map(|row| self.hydrate(row, conn)).collect()
    }

    /// Number of persisted commits
    pub fn commit_count(&self, conn: &Connection) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.names.commit_table());
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| persistence("commit_count", e))?;
        Ok(count.max(0) as u64)
    }

    fn hydrate(&self, row: CommitRow, conn: &Connection) -> Result<CommitRecord> {
        let metadata = CommitMetadata {
            commit_id: commit_id_key::decode(&row.commit_id_key)?,
            author: row.author,
            commit_date: timestamp::from_storage(row.commit_date)?,
            properties: self.find_properties(row.commit_pk, conn)?,
        };
        Ok(CommitRecord {
            surrogate_key: row.commit_pk,
            metadata,
        })
    }
}
