use crate::config::DEFAULT_TABLE_PREFIX;
use crate::errors::Result;
use verso_core::errors::LedgerError;

const COMMIT_TABLE: &str = "commit";
const COMMIT_PROPERTY_TABLE: &str = "commit_property";
const COMMIT_PK_SEQ: &str = "commit_pk_seq";
const COMMIT_PROPERTY_FK_INDEX: &str = "commit_property_commit_fk_idx";

/// Fully-qualified names of the ledger tables
///
/// `schema` names an attached SQLite database (e.g. `audit` after
/// `ATTACH DATABASE ... AS audit`); `table_prefix` is prepended to each table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNames {
    schema: Option<String>,
    table_prefix: String,
}

impl SchemaNames {
    /// Create validated naming; both parts must be plain SQL identifiers
    ///
    /// The prefix is mandatory: it keeps `commit` (a keyword) from being
    /// used as a bare table name.
    pub fn new(schema: Option<&str>, table_prefix: &str) -> Result<Self> {
        if let Some(schema) = schema {
            if !is_identifier(schema) {
                return Err(LedgerError::InvalidIdentifier {
                    identifier: schema.to_string(),
                }
                .into());
            }
        }
        if !is_identifier(table_prefix) {
            return Err(LedgerError::InvalidIdentifier {
                identifier: table_prefix.to_string(),
            }
            .into());
        }
        Ok(Self {
            schema: schema.map(str::to_string),
            table_prefix: table_prefix.to_string(),
        })
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    /// Qualified commit table name
    pub fn commit_table(&self) -> String {
        self.qualify(COMMIT_TABLE)
    }

    /// Qualified commit property table name
    pub fn commit_property_table(&self) -> String {
        self.qualify(COMMIT_PROPERTY_TABLE)
    }

    /// Qualified name of the table backing the surrogate key sequence
    pub fn commit_pk_seq(&self) -> String {
        self.qualify(COMMIT_PK_SEQ)
    }

    pub(crate) fn commit_property_fk_index(&self) -> String {
        self.qualify(COMMIT_PROPERTY_FK_INDEX)
    }

    /// Unqualified table name, as required inside REFERENCES and ON clauses
    pub(crate) fn bare(&self, table: &str) -> String {
        format!("{}{}", self.table_prefix, table)
    }

    pub(crate) fn bare_commit_table(&self) -> String {
        self.bare(COMMIT_TABLE)
    }

    pub(crate) fn bare_commit_property_table(&self) -> String {
        self.bare(COMMIT_PROPERTY_TABLE)
    }

    fn qualify(&self, table: &str) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.bare(table)),
            None => self.bare(table),
        }
    }
}

impl Default for SchemaNames {
    fn default() -> Self {
        Self {
            schema: None,
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
