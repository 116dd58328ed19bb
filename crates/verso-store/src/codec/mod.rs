//! Value codecs between domain values and their stored representation
//!
//! - `timestamp`: `NaiveDateTime` <-> epoch milliseconds
//! - `commit_id_key`: `CommitId` <-> fixed-width sortable text

pub mod commit_id_key;
pub mod timestamp;
