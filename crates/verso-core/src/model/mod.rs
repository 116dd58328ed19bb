//! Commit ledger domain model

pub mod commit;
pub mod commit_id;

pub use commit::{CommitMetadata, CommitProperty, CommitRecord};
pub use commit_id::CommitId;
