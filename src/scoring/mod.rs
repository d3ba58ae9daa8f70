use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::catalog::Question;

/// Outcome of scoring one block's answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockScore {
    pub correct: u32,
    pub incorrect: u32,
    /// 0-100, round-half-up. 0 when nothing was answered.
    pub efficiency: u8,
}

impl BlockScore {
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Round-half-up efficiency percentage from raw answer counts.
/// Shared with the progress aggregator, which applies the same rule to
/// summed counts across blocks.
pub fn efficiency_pct(correct: u32, answered: u32) -> u8 {
    if answered == 0 {
        return 0;
    }
    (100.0 * correct as f64 / answered as f64).round() as u8
}

/// Score a block's recorded answers against its question catalog.
///
/// The explicit `correct` flag on the matched option is authoritative.
/// Unanswered questions contribute to neither count, and so does an answer
/// whose value matches no option (stale catalog vs. stored answers) — the
/// entry is skipped, never an error.
pub fn score_block(answers: &AnswerSet, questions: &[Question]) -> BlockScore {
    let mut correct = 0u32;
    let mut incorrect = 0u32;

    for question in questions {
        let Some(value) = answers.selected(&question.id) else {
            continue;
        };
        match question.option_for_value(value) {
            Some(option) if option.correct => correct += 1,
            Some(_) => incorrect += 1,
            None => {
                tracing::warn!(
                    question_id = %question.id,
                    value = %value,
                    "Recorded answer matches no catalog option, skipping"
                );
            }
        }
    }

    BlockScore {
        correct,
        incorrect,
        efficiency: efficiency_pct(correct, correct + incorrect),
    }
}
