//! Ledger schema: table/column naming and bootstrap DDL
//!
//! Table names are resolved through `SchemaNames`, so schema qualification
//! and prefixing never leak into the ledger's query logic.

mod bootstrap;
mod names;

pub use bootstrap::ensure_schema;
pub use names::SchemaNames;

// Commit table columns
pub const COMMIT_PK: &str = "commit_pk";
pub const COMMIT_AUTHOR: &str = "author";
pub const COMMIT_COMMIT_DATE: &str = "commit_date";
pub const COMMIT_COMMIT_ID: &str = "commit_id";
/// Fixed-width sortable encoding of the commit id; carries the UNIQUE constraint
pub const COMMIT_COMMIT_ID_KEY: &str = "commit_id_key";

// Commit property table columns
pub const COMMIT_PROPERTY_PK: &str = "property_pk";
pub const COMMIT_PROPERTY_COMMIT_FK: &str = "commit_fk";
pub const COMMIT_PROPERTY_NAME: &str = "property_name";
pub const COMMIT_PROPERTY_VALUE: &str = "property_value";

// Sequence table columns
pub const SEQUENCE_ID: &str = "id";
pub const SEQUENCE_NEXT_VAL: &str = "next_val";
