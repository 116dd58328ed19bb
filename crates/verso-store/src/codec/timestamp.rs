//! Timestamp adapter
//!
//! Commit dates are naive local date-times. They are stored as INTEGER
//! milliseconds since the Unix epoch without any zone conversion, so
//! sub-millisecond precision is dropped.

use crate::errors::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use verso_core::errors::LedgerError;

/// Convert a commit date to its stored form
pub fn to_storage(date: &NaiveDateTime) -> i64 {
    date.and_utc().timestamp_millis()
}

/// Convert a stored value back to a commit date
pub fn from_storage(millis: i64) -> Result<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| {
            LedgerError::Serialization {
                message: format!("Stored commit date {} is out of range", millis),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_round_trip_at_millisecond_precision() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_milli_opt(23, 59, 58, 123)
            .unwrap();
        assert_eq!(from_storage(to_storage(&date)).unwrap(), date);
    }

    #[test]
    fn test_epoch_is_zero() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(to_storage(&epoch), 0);
    }

    #[test]
    fn test_sub_millisecond_truncated() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_nano_opt(0, 0, 0, 1_500_000)
            .unwrap();
        let back = from_storage(to_storage(&date)).unwrap();
        assert_eq!(back.and_utc().timestamp_subsec_nanos(), 1_000_000);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(from_storage(i64::MAX).is_err());
    }
}
