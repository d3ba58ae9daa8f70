pub mod data;

use serde::{Deserialize, Serialize};

/// Priority carried by a recommendation template and copied verbatim onto
/// the tasks generated from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Improvement-task template attached to an answer option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
}

/// One selectable answer for a question. `value` is the opaque token the
/// screens record into an AnswerSet; `correct` marks the intended best choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub value: String,
    pub correct: bool,
    #[serde(default)]
    pub recommendation: Option<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Find the option matching a recorded answer value. Returns None when the
    /// value matches no option (stale catalog vs. stored answers); callers
    /// skip such entries rather than fail.
    pub fn option_for_value(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// One thematic section of the diagnosis questionnaire, with its fixed,
/// ordered question list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// Static registry of diagnosis blocks. Loaded once at startup, never
/// user-editable.
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    pub blocks: Vec<Block>,
}

impl BlockCatalog {
    /// The built-in ten-block catalog.
    pub fn builtin() -> Self {
        BlockCatalog {
            blocks: data::builtin_blocks(),
        }
    }

    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_ten_blocks() {
        let catalog = BlockCatalog::builtin();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn builtin_block_ids_are_unique() {
        let catalog = BlockCatalog::builtin();
        for (i, a) in catalog.blocks.iter().enumerate() {
            for b in catalog.blocks.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn builtin_questions_have_exactly_one_correct_option() {
        // The data model does not enforce this, so the shipped data must.
        let catalog = BlockCatalog::builtin();
        for block in &catalog.blocks {
            assert!(!block.questions.is_empty(), "block {} has no questions", block.id);
            for question in &block.questions {
                let correct = question.options.iter().filter(|o| o.correct).count();
                assert_eq!(correct, 1, "question {} in {}", question.id, block.id);
            }
        }
    }

    #[test]
    fn builtin_option_values_are_unique_per_question() {
        let catalog = BlockCatalog::builtin();
        for block in &catalog.blocks {
            for question in &block.questions {
                for (i, a) in question.options.iter().enumerate() {
                    for b in question.options.iter().skip(i + 1) {
                        assert_ne!(a.value, b.value, "question {}", question.id);
                    }
                }
            }
        }
    }

    #[test]
    fn option_lookup_by_value() {
        let catalog = BlockCatalog::builtin();
        let block = &catalog.blocks[0];
        let question = &block.questions[0];
        let option = &question.options[0];
        let found = question.option_for_value(&option.value).unwrap();
        assert_eq!(found.id, option.id);
        assert!(question.option_for_value("no_such_value").is_none());
    }
}
