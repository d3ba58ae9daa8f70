use serde::{Deserialize, Serialize};

use crate::catalog::Question;

/// One recorded selection: which option value the user picked for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub question_id: String,
    pub value: String,
}

/// The answers recorded so far for one block.
///
/// Persisted as an association list of (question_id, value) entries rather
/// than a map, so the JSON shape does not depend on map serialization order;
/// lookups rebuild from the list on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    entries: Vec<AnswerEntry>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded value for a question, if any.
    pub fn selected(&self, question_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.question_id == question_id)
            .map(|e| e.value.as_str())
    }

    /// Record a selection, replacing any earlier one for the same question.
    pub fn record<Q: Into<String>, V: Into<String>>(&mut self, question_id: Q, value: V) {
        let question_id = question_id.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.question_id == question_id) {
            entry.value = value;
        } else {
            self.entries.push(AnswerEntry { question_id, value });
        }
    }

    /// True once every question in the list has a recorded answer.
    pub fn covers(&self, questions: &[Question]) -> bool {
        questions.iter().all(|q| self.selected(&q.id).is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnswerEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_replaces_existing_selection() {
        let mut answers = AnswerSet::new();
        answers.record("q1", "first");
        answers.record("q1", "second");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.selected("q1"), Some("second"));
    }

    #[test]
    fn selected_missing_question_is_none() {
        let answers = AnswerSet::new();
        assert!(answers.selected("q1").is_none());
    }

    #[test]
    fn serializes_as_association_list() {
        let mut answers = AnswerSet::new();
        answers.record("q1", "a");
        answers.record("q2", "b");
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "entries": [
                    { "question_id": "q1", "value": "a" },
                    { "question_id": "q2", "value": "b" }
                ]
            })
        );
        let back: AnswerSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, answers);
    }
}
