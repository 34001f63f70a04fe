//! Raw survey answers as submitted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from question id to the chosen answer code.
///
/// A `None` value is an explicitly skipped question. Absent, skipped and
/// unknown questions are all ignored when scoring. Codes are kept as given,
/// so an out-of-range code reaches the engine and is rejected there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnswers(BTreeMap<String, Option<i64>>);

impl RawAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of an answered question.
    pub fn with_answer(mut self, question: impl Into<String>, code: i64) -> Self {
        self.0.insert(question.into(), Some(code));
        self
    }

    /// Builder-style insert of a skipped question.
    pub fn with_skipped(mut self, question: impl Into<String>) -> Self {
        self.0.insert(question.into(), None);
        self
    }

    pub fn insert(&mut self, question: impl Into<String>, code: Option<i64>) {
        self.0.insert(question.into(), code);
    }

    /// The answer code for a question, if it was answered.
    pub fn get(&self, question: &str) -> Option<i64> {
        self.0.get(question).copied().flatten()
    }

    /// Answered questions in question-id order.
    pub fn answered(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0
            .iter()
            .filter_map(|(question, code)| code.map(|c| (question.as_str(), c)))
    }

    pub fn answered_count(&self) -> usize {
        self.answered().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<i64>)> for RawAnswers {
    fn from_iter<I: IntoIterator<Item = (String, Option<i64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answered_skips_null_answers() {
        let answers = RawAnswers::new()
            .with_answer("Q1", 2)
            .with_skipped("Q2")
            .with_answer("Q3", 5);

        let answered: Vec<_> = answers.answered().collect();
        assert_eq!(answered, vec![("Q1", 2), ("Q3", 5)]);
        assert_eq!(answers.answered_count(), 2);
        assert_eq!(answers.get("Q2"), None);
        assert_eq!(answers.get("Q3"), Some(5));
    }

    #[test]
    fn deserializes_from_plain_json_object() {
        let answers: RawAnswers =
            serde_json::from_str(r#"{"Q1": 1, "Q2": null, "Q4": 6}"#).unwrap();
        assert_eq!(answers.get("Q1"), Some(1));
        assert_eq!(answers.get("Q2"), None);
        assert_eq!(answers.get("Q4"), Some(6));
        assert_eq!(answers.answered_count(), 2);
    }

    #[test]
    fn out_of_range_codes_still_deserialize() {
        let answers: RawAnswers = serde_json::from_str(r#"{"Q1": 300, "Q2": -1}"#).unwrap();
        assert_eq!(answers.get("Q1"), Some(300));
        assert_eq!(answers.get("Q2"), Some(-1));
    }

    #[test]
    fn collects_from_pairs() {
        let answers: RawAnswers = vec![("Q1".to_string(), Some(3)), ("Q2".to_string(), None)]
            .into_iter()
            .collect();
        assert!(!answers.is_empty());
        assert_eq!(answers.answered_count(), 1);
    }
}
