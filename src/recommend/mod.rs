use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::answers::AnswerSet;
use crate::catalog::{Block, Priority};

/// A generated, user-trackable improvement recommendation tied to one
/// answered question. `completed` is toggled by the user after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    pub block_id: String,
    pub block_title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Deterministic task id from the (block, question, option) triple, so
/// repeated generation over the same answers yields identical ids and
/// callers can dedup safely.
pub fn task_id(block_id: &str, question_id: &str, option_id: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}:{}", block_id, question_id, option_id).as_bytes());
    digest.iter().take(8).map(|b| format!("{:02x}", b)).collect()
}

/// Materialize tasks from a block's answers.
///
/// Any selected option carrying a recommendation template produces a task,
/// whether or not the option is the correct one. Tasks come back in question
/// order; no cross-question merging is attempted.
pub fn generate_tasks(block: &Block, answers: &AnswerSet) -> Vec<Task> {
    let mut tasks = Vec::new();

    for question in &block.questions {
        let Some(value) = answers.selected(&question.id) else {
            continue;
        };
        let Some(option) = question.option_for_value(value) else {
            continue;
        };
        if let Some(rec) = &option.recommendation {
            tasks.push(Task {
                id: task_id(&block.id, &question.id, &option.id),
                title: rec.title.clone(),
                description: rec.description.clone(),
                priority: rec.priority,
                category: rec.category.clone(),
                block_id: block.id.clone(),
                block_title: block.title.clone(),
                completed: false,
            });
        }
    }

    tasks
}
