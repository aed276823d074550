//! Completion history: at most one record per local date.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::date_key::DateKey;
use crate::error::ValidationError;

/// Status of a completion record. A missing record means "not completed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Completed,
}

/// The user's report that a date's collection was put out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub date: DateKey,
    pub status: CompletionStatus,
    /// Opaque reference to the evidence attachment (e.g. a photo id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl CompletionRecord {
    pub fn completed(date: DateKey) -> Self {
        Self {
            date,
            status: CompletionStatus::Completed,
            evidence: None,
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == CompletionStatus::Completed
    }
}

/// Completion records keyed by date, iterated chronologically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(BTreeMap<DateKey, CompletionRecord>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` under its own date, replacing any record already
    /// there. Returns the replaced record.
    pub fn upsert(&mut self, record: CompletionRecord) -> Option<CompletionRecord> {
        self.0.insert(record.date, record)
    }

    pub fn get(&self, date: DateKey) -> Option<&CompletionRecord> {
        self.0.get(&date)
    }

    pub fn is_completed(&self, date: DateKey) -> bool {
        self.get(date).is_some_and(CompletionRecord::is_completed)
    }

    /// The chronologically first date holding any record.
    pub fn earliest(&self) -> Option<DateKey> {
        self.0.keys().next().copied()
    }

    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|r| r.is_completed()).count()
    }

    /// Bulk clear. Returns how many records were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.0.len();
        self.0.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompletionRecord> {
        self.0.values()
    }

    /// Every record must be filed under its own date.
    ///
    /// # Errors
    /// Returns the first entry whose key differs from the record's date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.0.iter().find(|(key, record)| **key != record.date) {
            Some((key, record)) => Err(ValidationError::HistoryDateMismatch {
                key: key.to_string(),
                date: record.date.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<CompletionRecord> for History {
    fn from_iter<I: IntoIterator<Item = CompletionRecord>>(iter: I) -> Self {
        let mut history = History::new();
        for record in iter {
            history.upsert(record);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn upsert_overwrites_same_date() {
        let mut history = History::new();
        assert!(history.upsert(CompletionRecord::completed(key("2024-04-01"))).is_none());
        let replaced = history.upsert(
            CompletionRecord::completed(key("2024-04-01")).with_evidence("photo-2"),
        );
        assert_eq!(replaced, Some(CompletionRecord::completed(key("2024-04-01"))));
        assert_eq!(history.len(), 1);
        assert_eq!(
            history.get(key("2024-04-01")).and_then(|r| r.evidence.as_deref()),
            Some("photo-2")
        );
    }

    #[test]
    fn earliest_is_chronological_not_insertion_order() {
        let history: History = ["2024-04-11", "2024-03-28", "2024-04-01"]
            .into_iter()
            .map(|d| CompletionRecord::completed(key(d)))
            .collect();
        assert_eq!(history.earliest(), Some(key("2024-03-28")));
        assert_eq!(History::new().earliest(), None);
    }

    #[test]
    fn clear_removes_everything() {
        let mut history: History = ["2024-04-01", "2024-04-04"]
            .into_iter()
            .map(|d| CompletionRecord::completed(key(d)))
            .collect();
        assert_eq!(history.completed_count(), 2);
        assert_eq!(history.clear(), 2);
        assert!(history.is_empty());
        assert!(!history.is_completed(key("2024-04-01")));
    }

    #[test]
    fn serializes_as_date_keyed_map() {
        let history: History = [CompletionRecord::completed(key("2024-04-01")).with_evidence("img-1")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["2024-04-01"]["status"], "completed");
        assert_eq!(json["2024-04-01"]["evidence"], "img-1");
        let back: History = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn validate_rejects_record_filed_under_another_date() {
        let json = serde_json::json!({
            "2024-04-01": { "date": "2024-04-05", "status": "completed" }
        });
        let history: History = serde_json::from_value(json).unwrap();
        assert_eq!(
            history.validate(),
            Err(ValidationError::HistoryDateMismatch {
                key: "2024-04-01".into(),
                date: "2024-04-05".into(),
            })
        );

        let ok: History = [CompletionRecord::completed(key("2024-04-01"))].into_iter().collect();
        assert_eq!(ok.validate(), Ok(()));
    }
}
