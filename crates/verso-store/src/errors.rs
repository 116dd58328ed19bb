//! Error handling for verso-store
//!
//! Wraps verso-core ExError with store-specific helpers

use rusqlite::ErrorCode;
use verso_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    persistence("sqlite", err)
}

/// Create a database error from rusqlite::Error, tagged with the failing operation
///
/// Busy/locked failures mean the busy timeout expired and are reported as
/// `Timeout`. Key and column constraint failures are `ConstraintViolation`;
/// everything else (trigger aborts included) is a `Persistence` failure.
pub fn persistence(op: &str, err: rusqlite::Error) -> ExError {
    let kind = match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => ExErrorKind::Timeout,
        Some(ErrorCode::ConstraintViolation) if is_key_constraint(&err) => {
            ExErrorKind::ConstraintViolation
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op(op.to_string())
        .with_message(err.to_string())
}

fn is_key_constraint(err: &rusqlite::Error) -> bool {
    use rusqlite::ffi;

    match err {
        rusqlite::Error::SqliteFailure(failure, _) => matches!(
            failure.extended_code,
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                | ffi::SQLITE_CONSTRAINT_UNIQUE
                | ffi::SQLITE_CONSTRAINT_FOREIGNKEY
                | ffi::SQLITE_CONSTRAINT_NOTNULL
                | ffi::SQLITE_CONSTRAINT_CHECK
        ),
        _ => false,
    }
}

/// Whether `err` is a UNIQUE constraint violation on `column`
pub fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, message) => {
            failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message
                    .as_deref()
                    .map(|m| m.contains(column))
                    .unwrap_or(false)
        }
        _ => false,
    }
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(reason)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
