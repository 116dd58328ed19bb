//! CLI subcommands and the shared ledger context

pub mod commit;
pub mod head;
pub mod init;
pub mod log;
pub mod show;

use clap::Args;
use rusqlite::Connection;
use std::path::PathBuf;
use verso_core::Result;
use verso_store::{db, ensure_schema, CommitLedgerStore, LedgerConfig};

/// Options shared by every subcommand
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the configuration file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Table prefix (overrides the configuration file)
    #[arg(long, global = true)]
    pub table_prefix: Option<String>,
}

/// An opened ledger: connection, store and the configuration that produced them
pub struct LedgerContext {
    pub conn: Connection,
    pub store: CommitLedgerStore,
    pub config: LedgerConfig,
}

impl GlobalArgs {
    /// Resolve configuration: file values first, then command-line overrides
    pub fn resolve_config(&self) -> Result<LedgerConfig> {
        let mut config = match &self.config {
            Some(path) => LedgerConfig::load(path)?,
            None => LedgerConfig::default(),
        };
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(prefix) = &self.table_prefix {
            config.table_prefix = prefix.clone();
        }
        Ok(config)
    }
}

/// Open the configured database, creating it and the ledger tables if needed
///
/// Used by the commands that write: `init` and `commit`.
pub fn open_ledger(global: &GlobalArgs) -> Result<LedgerContext> {
    let config = global.resolve_config()?;
    let names = config.schema_names()?;
    let conn = db::open_configured(&config)?;
    ensure_schema(&conn, &names)?;
    Ok(LedgerContext {
        conn,
        store: CommitLedgerStore::new(names),
        config,
    })
}

/// Open an existing ledger for reading; never creates files or tables
pub fn open_existing_ledger(global: &GlobalArgs) -> Result<LedgerContext> {
    let config = global.resolve_config()?;
    let names = config.schema_names()?;
    let conn = db::open_existing(&config)?;
    Ok(LedgerContext {
        conn,
        store: CommitLedgerStore::new(names),
        config,
    })
}
