use thiserror::Error;
use verso_core_types::RequestId;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and the CLI exit
/// path) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidCommitId,
    NotFound,

    // Ledger invariants
    /// A commit with the same identifier is already persisted
    DuplicateCommit,
    /// Any other constraint rejected a row (primary key, foreign key, NOT NULL, CHECK)
    ConstraintViolation,

    // Integration/IO
    Io,
    Serialization,
    /// Any failure surfaced by the storage backend (connectivity, lock, constraint)
    Persistence,
    Timeout,

    // Configuration
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidCommitId => "ERR_INVALID_COMMIT_ID",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DuplicateCommit => "ERR_DUPLICATE_COMMIT",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }

    /// Whether the failure came from the storage backend rather than from
    /// the ledger's own invariants
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            ExErrorKind::Persistence
                | ExErrorKind::ConstraintViolation
                | ExErrorKind::Io
                | ExErrorKind::Timeout
        )
    }
}

/// Canonical structured error type
///
/// Classification fields support programmatic handling; the free-form
/// message and optional source chain support debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (the commit id for ledger errors)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the commit ledger
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// A commit with this identifier is already persisted
    #[error("Commit {commit_id} is already persisted")]
    DuplicateCommit { commit_id: String },

    /// Commit identifier could not be parsed or is out of range
    #[error("Invalid commit id '{input}': {reason}")]
    InvalidCommitId { input: String, reason: String },

    /// No commit with this identifier exists
    #[error("Commit not found: {commit_id}")]
    CommitNotFound { commit_id: String },

    /// Schema, table or column identifier is not a plain SQL identifier
    #[error("Invalid SQL identifier '{identifier}'")]
    InvalidIdentifier { identifier: String },

    /// Value could not be converted to or from its stored representation
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<LedgerError> for ExError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::DuplicateCommit { commit_id } => {
                ExError::new(ExErrorKind::DuplicateCommit)
                    .with_entity_id(commit_id)
                    .with_message("Commit is already persisted")
            }
            LedgerError::InvalidCommitId { input, reason } => {
                ExError::new(ExErrorKind::InvalidCommitId)
                    .with_entity_id(input)
                    .with_message(reason)
            }
            LedgerError::CommitNotFound { commit_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(commit_id)
                .with_message("Commit not found"),
            LedgerError::InvalidIdentifier { identifier } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(identifier)
                    .with_message("Not a valid SQL identifier")
            }
            LedgerError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}
