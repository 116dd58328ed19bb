//! Ledger configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file at all) yields a working configuration.

use crate::errors::{config_error, io_error, Result};
use crate::schema::SchemaNames;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default database location, relative to the working directory
pub const DEFAULT_DB_PATH: &str = ".verso/ledger.db";

/// Default prefix for ledger table names
pub const DEFAULT_TABLE_PREFIX: &str = "jv_";

/// Default time a writer waits for the database lock
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configuration for opening a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Attached schema holding the ledger tables (`None` = main database)
    pub schema: Option<String>,
    /// Prefix applied to every ledger table name
    pub table_prefix: String,
    /// How long a writer waits for the database lock, in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            schema: None,
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl LedgerConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config: {}", e)))
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| io_error("load_config", e))?;
        Self::from_toml_str(&content)
    }

    /// Validated table naming for this configuration
    pub fn schema_names(&self) -> Result<SchemaNames> {
        SchemaNames::new(self.schema.as_deref(), &self.table_prefix)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verso_core::ExErrorKind;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = LedgerConfig::from_toml_str(
            r#"
            db_path = "/var/lib/verso/audit.db"
            table_prefix = "audit_"
            "#,
        )
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/verso/audit.db"));
        assert_eq!(config.table_prefix, "audit_");
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert_eq!(
            config.schema_names().unwrap().commit_table(),
            "audit_commit"
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = LedgerConfig::from_toml_str("pool_size = 4").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Config);
    }

    #[test]
    fn test_invalid_prefix_rejected_by_schema_names() {
        let config = LedgerConfig {
            table_prefix: "jv; DROP TABLE x".to_string(),
            ..LedgerConfig::default()
        };
        assert_eq!(
            config.schema_names().unwrap_err().kind(),
            ExErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = LedgerConfig::load("/nonexistent/verso.toml").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
    }
}
