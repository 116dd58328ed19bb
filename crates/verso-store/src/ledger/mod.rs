//! Commit ledger
//!
//! `CommitLedgerStore` owns the "commit ids are unique" invariant. Writes go
//! through `save`, which checks for an existing commit, allocates a surrogate
//! key, inserts the commit row and then its property rows, all inside the
//! caller's transaction. Nothing is committed or rolled back here.
//!
//! ## Concurrent saves of the same commit id
//!
//! The existence check and the insert are not atomic across transactions.
//! The UNIQUE constraint on the commit id key column is the authoritative
//! guard: when a concurrent writer wins the race, the constraint violation is
//! reported as `DuplicateCommit`, exactly like a pre-check hit. Opening write
//! transactions with `db::begin_immediate` additionally serializes writers so
//! the pre-check sees every committed commit.

mod query;
mod store;

pub use store::CommitLedgerStore;
