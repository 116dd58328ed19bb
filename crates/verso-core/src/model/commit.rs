//! Commit metadata and properties

use crate::model::CommitId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single key/value property attached to a commit
///
/// Names are not unique per commit: repeated names are kept verbatim, in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitProperty {
    pub name: String,
    pub value: String,
}

impl CommitProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Metadata describing one logical commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMetadata {
    pub commit_id: CommitId,
    pub author: String,
    pub commit_date: NaiveDateTime,
    pub properties: Vec<CommitProperty>,
}

impl CommitMetadata {
    /// Create commit metadata without properties
    pub fn new(commit_id: CommitId, author: impl Into<String>, commit_date: NaiveDateTime) -> Self {
        Self {
            commit_id,
            author: author.into(),
            commit_date,
            properties: Vec::new(),
        }
    }

    /// Append a property, keeping any existing property with the same name
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(CommitProperty::new(name, value));
        self
    }

    /// First value recorded under `name`
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// All values recorded under `name`, in insertion order
    pub fn property_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.properties
            .iter()
            .filter(move |p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// A persisted commit as read back from the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Store-internal key linking the commit to its property rows
    pub surrogate_key: i64,
    #[serde(flatten)]
    pub metadata: CommitMetadata,
}

impl CommitRecord {
    pub fn commit_id(&self) -> &CommitId {
        &self.metadata.commit_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_with_property_keeps_duplicates_in_order() {
        let meta = CommitMetadata::new(CommitId::from_major(1), "alice", date())
            .with_property("tag", "a")
            .with_property("tag", "b");

        assert_eq!(meta.properties.len(), 2);
        assert_eq!(meta.property("tag"), Some("a"));
        assert_eq!(meta.property_values("tag").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(meta.property("missing"), None);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = CommitRecord {
            surrogate_key: 4,
            metadata: CommitMetadata::new(CommitId::new(2, 5).unwrap(), "bob", date())
                .with_property("branch", "main"),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["surrogate_key"], 4);
        assert_eq!(json["commit_id"], "2.05");
        assert_eq!(json["author"], "bob");
        assert_eq!(json["properties"][0]["name"], "branch");
    }
}
