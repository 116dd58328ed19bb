//! Sortable commit id encoding
//!
//! SQLite has no exact decimal type, so each commit id is also stored as a
//! fixed-width, zero-padded text key: 29 integer digits, a dot, 28 fraction
//! digits. These widths cover every `rust_decimal::Decimal` value, and for
//! equal-width digit strings text order is numeric order. `MAX()`, equality
//! and the UNIQUE constraint therefore all operate on exact numeric values.

use crate::errors::Result;
use verso_core::errors::LedgerError;
use verso_core::CommitId;

/// Digits before the decimal point
pub const INTEGER_DIGITS: usize = 29;

/// Digits after the decimal point
pub const FRACTION_DIGITS: usize = 28;

/// Encode a commit id as its sortable key
pub fn encode(commit_id: &CommitId) -> String {
    let text = commit_id.value_as_number().normalize().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    format!(
        "{:0>iw$}.{:0<fw$}",
        integer,
        fraction,
        iw = INTEGER_DIGITS,
        fw = FRACTION_DIGITS
    )
}

/// Decode a sortable key back into a commit id
pub fn decode(key: &str) -> Result<CommitId> {
    let invalid = || -> verso_core::ExError {
        LedgerError::Serialization {
            message: format!("Malformed commit id key '{}'", key),
        }
        .into()
    };

    let (integer, fraction) = key.split_once('.').ok_or_else(invalid)?;
    if integer.len() != INTEGER_DIGITS
        || fraction.len() != FRACTION_DIGITS
        || !integer.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let integer = match integer.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    let fraction = fraction.trim_end_matches('0');
    let text = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    };

    text.parse::<CommitId>().map_err(|_| invalid())
}
