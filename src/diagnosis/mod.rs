pub mod history;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::catalog::Block;
use crate::error::DiagError;
use crate::progress::{self, DiagnosisSummary};
use crate::recommend::{generate_tasks, Task};
use crate::scoring::{score_block, BlockScore};
use crate::state::app::AppState;
use crate::storage::{answers_key, migration, Dataset};

/// Persisted per-block outcome. `efficiency` is defined iff `completed` is
/// true; the two constructors are the only construction paths that should
/// be used outside tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub efficiency: Option<u8>,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub answers: AnswerSet,
}

impl BlockResult {
    /// Not-completed placeholder for a catalog block without a stored result.
    pub fn placeholder(block: &Block) -> Self {
        BlockResult {
            id: block.id.clone(),
            title: block.title.clone(),
            description: block.description.clone(),
            completed: false,
            efficiency: None,
            correct: 0,
            incorrect: 0,
            completed_at: None,
            answers: AnswerSet::new(),
        }
    }

    /// Completed result from a score.
    pub fn from_score(block: &Block, score: &BlockScore, answers: AnswerSet, completed_at: i64) -> Self {
        BlockResult {
            id: block.id.clone(),
            title: block.title.clone(),
            description: block.description.clone(),
            completed: true,
            efficiency: Some(score.efficiency),
            correct: score.correct,
            incorrect: score.incorrect,
            completed_at: Some(completed_at),
            answers,
        }
    }
}

/// What happened when an answer was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// Whether the updated answer set reached storage.
    pub saved: bool,
    /// Whether this answer was the block's last and completion ran.
    pub block_completed: bool,
    /// Tasks newly appended by completion, zero otherwise.
    pub new_task_count: usize,
}

/// What happened when a block was completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub result: BlockResult,
    pub new_tasks: Vec<Task>,
    /// Whether every write reached storage. The caller shows a
    /// "changes not saved" state on false; nothing is thrown.
    pub saved: bool,
}

/// Record one answer selection for a block.
///
/// The updated answer set is persisted under the block's answers key, and
/// when it now covers every question of the block, completion runs: the
/// block is scored, tasks are generated and the results view data is
/// written. An unknown question id is logged and dropped rather than failed,
/// matching the scorer's tolerance for stale data.
pub async fn record_answer(
    state: &AppState,
    block_id: &str,
    question_id: &str,
    value: &str,
) -> Result<AnswerOutcome, DiagError> {
    let block = state
        .catalog
        .block(block_id)
        .ok_or_else(|| DiagError::new(format!("unknown block: {}", block_id), "catalog"))?;

    if !block.questions.iter().any(|q| q.id == question_id) {
        tracing::warn!(block_id = block_id, question_id = question_id, "Answer for unknown question dropped");
        return Ok(AnswerOutcome {
            saved: false,
            block_completed: false,
            new_task_count: 0,
        });
    }

    let key = answers_key(block_id);
    let mut answers: AnswerSet = state.store.read_or_default(&key).await;
    answers.record(question_id, value);
    let saved = state.store.write(&key, &answers).await;

    if answers.covers(&block.questions) {
        let completion = complete_block(state, block_id).await?;
        return Ok(AnswerOutcome {
            saved: saved && completion.saved,
            block_completed: true,
            new_task_count: completion.new_tasks.len(),
        });
    }

    Ok(AnswerOutcome {
        saved,
        block_completed: false,
        new_task_count: 0,
    })
}

/// Score a block's stored answers and persist the derived result and tasks.
///
/// Completing is one-shot per block: an already-completed block is returned
/// as stored, with no rescoring and no task regeneration. New tasks are
/// appended to the running task list, deduplicated by their deterministic
/// ids, so re-running over identical answers cannot duplicate them.
pub async fn complete_block(state: &AppState, block_id: &str) -> Result<CompletionOutcome, DiagError> {
    let block = state
        .catalog
        .block(block_id)
        .ok_or_else(|| DiagError::new(format!("unknown block: {}", block_id), "catalog"))?;

    let namespace = state.resolve_namespace();
    let blocks_key = namespace.key(Dataset::Blocks);
    let mut results: Vec<BlockResult> = state.store.read_or_default(&blocks_key).await;

    if let Some(existing) = results.iter().find(|r| r.id == block.id && r.completed) {
        tracing::debug!(block_id = block_id, "Block already completed, returning stored result");
        return Ok(CompletionOutcome {
            result: existing.clone(),
            new_tasks: vec![],
            saved: true,
        });
    }

    let answers: AnswerSet = state.store.read_or_default(&answers_key(block_id)).await;
    let score = score_block(&answers, &block.questions);
    let result = BlockResult::from_score(block, &score, answers.clone(), Utc::now().timestamp());

    results.retain(|r| r.id != block.id);
    results.push(result.clone());
    let mut saved = state.store.write(&blocks_key, &results).await;

    let tasks_key = namespace.key(Dataset::Tasks);
    let mut tasks: Vec<Task> = state.store.read_or_default(&tasks_key).await;
    let new_tasks: Vec<Task> = generate_tasks(block, &answers)
        .into_iter()
        .filter(|t| !tasks.iter().any(|existing| existing.id == t.id))
        .collect();
    if !new_tasks.is_empty() {
        tasks.extend(new_tasks.iter().cloned());
        saved &= state.store.write(&tasks_key, &tasks).await;
    }

    let all_done = state
        .catalog
        .blocks
        .iter()
        .all(|b| results.iter().any(|r| r.id == b.id && r.completed));
    if all_done {
        saved &= state
            .store
            .write(&namespace.key(Dataset::AllBlocksCompleted), &true)
            .await;
    }

    tracing::info!(
        block_id = block_id,
        efficiency = score.efficiency,
        new_tasks = new_tasks.len(),
        saved = saved,
        "Block completed"
    );

    Ok(CompletionOutcome {
        result,
        new_tasks,
        saved,
    })
}

/// Stored block results for the current namespace. Missing or malformed
/// storage reads as empty.
pub async fn load_results(state: &AppState) -> Vec<BlockResult> {
    let key = state.resolve_namespace().key(Dataset::Blocks);
    state.store.read_or_default(&key).await
}

/// The running task list for the current namespace.
pub async fn load_tasks(state: &AppState) -> Vec<Task> {
    let key = state.resolve_namespace().key(Dataset::Tasks);
    state.store.read_or_default(&key).await
}

/// Toggle a task's completed flag. Returns false when the task is unknown
/// or the write did not reach storage.
pub async fn set_task_completed(state: &AppState, task_id: &str, completed: bool) -> bool {
    let key = state.resolve_namespace().key(Dataset::Tasks);
    let mut tasks: Vec<Task> = state.store.read_or_default(&key).await;

    let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) else {
        tracing::warn!(task_id = task_id, "Toggle for unknown task ignored");
        return false;
    };
    task.completed = completed;

    state.store.write(&key, &tasks).await
}

/// Aggregate view over the stored results, padded to the full catalog.
pub async fn build_summary(state: &AppState) -> DiagnosisSummary {
    let results = load_results(state).await;
    let tasks = load_tasks(state).await;
    progress::summarize(&state.catalog, &results, &tasks)
}

/// Submit the current run: compute the summary, rotate the dashboard
/// current result into previous, persist the new current result and append
/// a history snapshot. Returns the summary either way; persistence failures
/// degrade to a logged warning.
pub async fn finish_run(state: &AppState) -> DiagnosisSummary {
    let summary = build_summary(state).await;
    let namespace = state.resolve_namespace();
    let now = Utc::now().timestamp();

    let current_key = namespace.key(Dataset::CurrentResult);
    if let Some(previous) = state
        .store
        .read::<progress::AggregateResult>(&current_key)
        .await
    {
        state
            .store
            .write(&namespace.key(Dataset::PreviousResult), &previous)
            .await;
    }
    state.store.write(&current_key, &summary.to_record(now)).await;

    let entry = history::HistoryEntry::from_summary(&summary, now);
    history::append(&state.store, entry).await;

    summary
}

/// Explicit "forget all diagnosis results" action. Clears both namespaces'
/// key families and every block's raw answers.
pub async fn reset_results(state: &AppState) {
    let session = state.current_session();
    migration::reset(&state.store, &state.catalog, session.user_id()).await;
}
