//! Database connection management
//!
//! Opening, configuring and starting write transactions on SQLite connections

use crate::config::LedgerConfig;
use crate::errors::{from_rusqlite, io_error, persistence, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use verso_core::errors::{ExError, ExErrorKind};
use std::path::Path;
use std::time::Duration;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection: foreign keys, WAL journal and busy timeout
pub fn configure(conn: &Connection, busy_timeout: Duration) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(from_rusqlite)?;

    // In-memory databases answer "memory"; the reported mode is not needed.
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
        row.get::<_, String>(0)
    })
    .map_err(from_rusqlite)?;

    conn.busy_timeout(busy_timeout).map_err(from_rusqlite)?;

    Ok(())
}

/// Open and configure the database described by `config`
///
/// Creates the parent directory of `db_path` when it does not exist yet.
pub fn open_configured(config: &LedgerConfig) -> Result<Connection> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("open_configured", e))?;
        }
    }
    let conn = open(&config.db_path)?;
    configure(&conn, config.busy_timeout())?;
    tracing::debug!(db_path = %config.db_path.display(), "Opened ledger database");
    Ok(conn)
}

/// Open and configure an existing ledger database without creating anything
///
/// Fails with `NotFound` when `db_path` does not exist.
pub fn open_existing(config: &LedgerConfig) -> Result<Connection> {
    if !config.db_path.is_file() {
        return Err(ExError::new(ExErrorKind::NotFound)
            .with_op("open_existing")
            .with_entity_id(config.db_path.display().to_string())
            .with_message("Ledger database not found; run `verso init` first"));
    }
    let conn = open(&config.db_path)?;
    configure(&conn, config.busy_timeout())?;
    Ok(conn)
}

/// Begin a write transaction that takes the database write lock up front
///
/// Writers are serialized from the first statement on, so the duplicate
/// pre-check inside `save` observes every previously committed commit.
pub fn begin_immediate(conn: &mut Connection) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| persistence("begin_immediate", e))
}
