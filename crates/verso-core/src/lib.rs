//! Verso Core - commit ledger domain model and shared facilities
//!
//! This crate provides:
//! - The commit metadata model (`CommitId`, `CommitMetadata`, `CommitProperty`, `CommitRecord`)
//! - The canonical error facility (`ExError`, `ExErrorKind`, `LedgerError`)
//! - The structured logging facility (`init`, `log_op_*` macros, test capture)
//!
//! Persistence lives in `verso-store`.

pub mod errors;
pub mod logging_facility;
pub mod model;

// Used by the logging macros so callers don't need a direct dependency.
#[doc(hidden)]
pub use verso_core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, LedgerError, Result};
pub use model::{CommitId, CommitMetadata, CommitProperty, CommitRecord};
