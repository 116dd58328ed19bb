//! Commit identifier
//!
//! A `CommitId` is an exact, non-negative decimal number. Identifiers are
//! compared numerically: `9 < 10` and `1.5 == 1.50`. The value is normalized
//! on construction so derived equality, hashing and ordering all agree.

use crate::errors::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places used by the minor component of `major.minor` ids
const MINOR_SCALE: u32 = 2;

/// Upper bound (exclusive) for the minor component
pub const MINOR_LIMIT: u32 = 100;

/// Globally unique, totally ordered commit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(Decimal);

impl CommitId {
    /// Build an identifier from a major number and a two-digit minor number,
    /// e.g. `(12, 1)` is `12.01`.
    pub fn new(major: u64, minor: u32) -> Result<Self, LedgerError> {
        if minor >= MINOR_LIMIT {
            return Err(LedgerError::InvalidCommitId {
                input: format!("{}.{}", major, minor),
                reason: format!("minor id must be below {}", MINOR_LIMIT),
            });
        }
        let value = Decimal::from(major) + Decimal::new(i64::from(minor), MINOR_SCALE);
        Ok(Self(value.normalize()))
    }

    /// Build an identifier with a zero minor component
    pub fn from_major(major: u64) -> Self {
        Self(Decimal::from(major))
    }

    /// Build an identifier from an arbitrary non-negative decimal
    pub fn from_decimal(value: Decimal) -> Result<Self, LedgerError> {
        if value.is_zero() {
            return Ok(Self(Decimal::ZERO));
        }
        if value.is_sign_negative() {
            return Err(LedgerError::InvalidCommitId {
                input: value.to_string(),
                reason: "commit id must not be negative".to_string(),
            });
        }
        Ok(Self(value.normalize()))
    }

    /// The identifier as an exact decimal number
    pub fn value_as_number(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CommitId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Exact parsing: digits beyond what `Decimal` holds are an error, not rounded.
        let value = Decimal::from_str_exact(trimmed).map_err(|e| LedgerError::InvalidCommitId {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_decimal(value).map_err(|_| LedgerError::InvalidCommitId {
            input: s.to_string(),
            reason: "commit id must not be negative".to_string(),
        })
    }
}

impl From<u64> for CommitId {
    fn from(major: u64) -> Self {
        Self::from_major(major)
    }
}

impl Serialize for CommitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CommitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CommitId::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_formats_minor_as_hundredths() {
        let id = CommitId::new(12, 1).unwrap();
        assert_eq!(id.to_string(), "12.01");
        assert_eq!(id.value_as_number(), Decimal::new(1201, 2));
    }

    #[test]
    fn test_new_rejects_three_digit_minor() {
        assert!(CommitId::new(1, 100).is_err());
    }

    #[test]
    fn test_numeric_not_lexical_ordering() {
        let nine: CommitId = "9".parse().unwrap();
        let ten: CommitId = "10".parse().unwrap();
        assert!(nine < ten);
        assert!("9.5".parse::<CommitId>().unwrap() < ten);
    }

    #[test]
    fn test_trailing_zeros_are_equal() {
        let a: CommitId = "1.5".parse().unwrap();
        let b: CommitId = "1.50".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b.to_string(), "1.5");
    }

    #[test]
    fn test_zero_is_a_valid_id() {
        let zero: CommitId = "0".parse().unwrap();
        assert_eq!(zero, CommitId::from_major(0));
        assert_eq!(zero.to_string(), "0");
    }

    #[test]
    fn test_negative_and_garbage_rejected() {
        assert!("-1".parse::<CommitId>().is_err());
        assert!("abc".parse::<CommitId>().is_err());
        assert!("".parse::<CommitId>().is_err());
    }

    #[test]
    fn test_exceeds_machine_word() {
        let big: CommitId = "18446744073709551616.5".parse().unwrap();
        assert!(big > CommitId::from_major(u64::MAX));
        assert_eq!(big.to_string(), "18446744073709551616.5");
    }

    #[test]
    fn test_excess_fraction_digits_rejected_not_rounded() {
        let err = "1.00000000000000000000000000001"
            .parse::<CommitId>()
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCommitId { .. }));
        assert!("1.00000000000000000000000000002".parse::<CommitId>().is_err());

        // 28 fraction digits is the exact limit.
        let finest: CommitId = "1.0000000000000000000000000001".parse().unwrap();
        assert!(finest > CommitId::from_major(1));
    }

    #[test]
    fn test_serde_as_string() {
        let id = CommitId::new(3, 7).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3.07\"");
        let back: CommitId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
