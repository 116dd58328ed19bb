use super::{
    SchemaNames, COMMIT_AUTHOR, COMMIT_COMMIT_DATE, COMMIT_COMMIT_ID, COMMIT_COMMIT_ID_KEY,
    COMMIT_PK, COMMIT_PROPERTY_COMMIT_FK, COMMIT_PROPERTY_NAME, COMMIT_PROPERTY_PK,
    COMMIT_PROPERTY_VALUE, SEQUENCE_ID, SEQUENCE_NEXT_VAL,
};
use crate::errors::{persistence, Result};
use rusqlite::Connection;

/// Create the ledger tables if they do not exist yet
///
/// Idempotent. The UNIQUE constraint on the commit id key column is the
/// authoritative duplicate guard; the pre-check in `save` only produces the
/// friendlier error earlier.
pub fn ensure_schema(conn: &Connection, names: &SchemaNames) -> Result<()> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {commit} (
            {commit_pk} INTEGER PRIMARY KEY,
            {author} TEXT NOT NULL,
            {commit_date} INTEGER NOT NULL,
            {commit_id} TEXT NOT NULL,
            {commit_id_key} TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS {property} (
            {property_pk} INTEGER PRIMARY KEY,
            {commit_fk} INTEGER NOT NULL
                REFERENCES {bare_commit}({commit_pk}) ON DELETE CASCADE,
            {property_name} TEXT NOT NULL,
            {property_value} TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS {fk_index}
            ON {bare_property}({commit_fk});

        CREATE TABLE IF NOT EXISTS {seq} (
            {seq_id} INTEGER PRIMARY KEY CHECK ({seq_id} = 1),
            {next_val} INTEGER NOT NULL
        );

        INSERT OR IGNORE INTO {seq} ({seq_id}, {next_val}) VALUES (1, 0);
        "#,
        commit = names.commit_table(),
        property = names.commit_property_table(),
        seq = names.commit_pk_seq(),
        fk_index = names.commit_property_fk_index(),
        bare_commit = names.bare_commit_table(),
        bare_property = names.bare_commit_property_table(),
        commit_pk = COMMIT_PK,
        author = COMMIT_AUTHOR,
        commit_date = COMMIT_COMMIT_DATE,
        commit_id = COMMIT_COMMIT_ID,
        commit_id_key = COMMIT_COMMIT_ID_KEY,
        property_pk = COMMIT_PROPERTY_PK,
        commit_fk = COMMIT_PROPERTY_COMMIT_FK,
        property_name = COMMIT_PROPERTY_NAME,
        property_value = COMMIT_PROPERTY_VALUE,
        seq_id = SEQUENCE_ID,
        next_val = SEQUENCE_NEXT_VAL,
    );

    conn.execute_batch(&ddl)
        .map_err(|e| persistence("ensure_schema", e))?;

    tracing::debug!(
        commit_table = %names.commit_table(),
        "Ensured commit ledger schema"
    );

    Ok(())
}
