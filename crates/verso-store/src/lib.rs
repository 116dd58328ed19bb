//! Verso Store - the commit ledger persisted in SQLite
//!
//! Provides:
//! - `CommitLedgerStore`: duplicate-guarded commit saves, head lookup and reads
//! - Schema/table naming (`SchemaNames`) and idempotent schema bootstrap
//! - Surrogate key allocation behind the `SurrogateKeyGenerator` trait
//! - Value codecs for timestamps and commit identifiers
//! - Connection helpers and `LedgerConfig`
//!
//! Every operation runs inside a transactional scope owned by the caller:
//! writes take a `rusqlite::Transaction`, reads take any `Connection`.

pub mod codec;
pub mod config;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod schema;
pub mod sequence;

// Re-export key types
pub use config::LedgerConfig;
pub use errors::Result;
pub use ledger::CommitLedgerStore;
pub use schema::{ensure_schema, SchemaNames};
pub use sequence::{SequenceTable, SurrogateKeyGenerator};
