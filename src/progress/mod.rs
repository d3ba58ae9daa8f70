use serde::{Deserialize, Serialize};

use crate::catalog::BlockCatalog;
use crate::diagnosis::BlockResult;
use crate::recommend::Task;
use crate::scoring::efficiency_pct;

/// Efficiency below this is "critical"; at or above and below GOOD_MIN is
/// "moderate". Exact cutoffs, used everywhere a band is derived.
pub const MODERATE_MIN: u8 = 38;
/// Efficiency at or above this is "good"; a completed block below it counts
/// as weak.
pub const GOOD_MIN: u8 = 78;

/// Presentation band derived from an efficiency value. Not a scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyBand {
    Critical,
    Moderate,
    Good,
    /// Block not completed yet, no efficiency to band.
    Neutral,
}

impl EfficiencyBand {
    pub fn from_efficiency(efficiency: Option<u8>) -> Self {
        match efficiency {
            None => EfficiencyBand::Neutral,
            Some(e) if e < MODERATE_MIN => EfficiencyBand::Critical,
            Some(e) if e < GOOD_MIN => EfficiencyBand::Moderate,
            Some(_) => EfficiencyBand::Good,
        }
    }
}

/// One row of the ranked results view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedBlock {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub efficiency: Option<u8>,
    pub band: EfficiencyBand,
}

/// Aggregate view over one diagnosis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisSummary {
    pub overall_efficiency: u8,
    pub weak_block_count: usize,
    pub total_task_count: usize,
    pub completed_block_count: usize,
    pub ranked_blocks: Vec<RankedBlock>,
}

/// Compact persisted form of a summary, written to the dashboard
/// current/previous result keys. The ranked list is recomputed for display,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub overall_efficiency: u8,
    pub weak_block_count: usize,
    pub total_task_count: usize,
    pub completed_block_count: usize,
    pub generated_at: i64,
}

impl DiagnosisSummary {
    pub fn to_record(&self, generated_at: i64) -> AggregateResult {
        AggregateResult {
            overall_efficiency: self.overall_efficiency,
            weak_block_count: self.weak_block_count,
            total_task_count: self.total_task_count,
            completed_block_count: self.completed_block_count,
            generated_at,
        }
    }
}

/// Combine per-block results into the aggregate view.
///
/// Results are padded with not-completed placeholders for every catalog block
/// without a stored result, so the ranked list always covers the full
/// catalog. Overall efficiency is the weighted average over raw answer
/// counts of completed blocks, not an average of per-block percentages.
pub fn summarize(
    catalog: &BlockCatalog,
    results: &[BlockResult],
    tasks: &[Task],
) -> DiagnosisSummary {
    let mut padded: Vec<BlockResult> = Vec::with_capacity(catalog.len());
    for block in &catalog.blocks {
        match results.iter().find(|r| r.id == block.id) {
            Some(result) => padded.push(result.clone()),
            None => padded.push(BlockResult::placeholder(block)),
        }
    }

    let mut correct_sum = 0u32;
    let mut answered_sum = 0u32;
    let mut weak_block_count = 0usize;
    let mut completed_block_count = 0usize;
    for result in padded.iter().filter(|r| r.completed) {
        completed_block_count += 1;
        correct_sum += result.correct;
        answered_sum += result.correct + result.incorrect;
        if result.efficiency.unwrap_or(0) < GOOD_MIN {
            weak_block_count += 1;
        }
    }

    // Stable sort: ties keep catalog order, not-completed sorts as 0.
    let mut ranked = padded;
    ranked.sort_by_key(|r| r.efficiency.unwrap_or(0));

    DiagnosisSummary {
        overall_efficiency: efficiency_pct(correct_sum, answered_sum),
        weak_block_count,
        total_task_count: tasks.len(),
        completed_block_count,
        ranked_blocks: ranked
            .into_iter()
            .map(|r| RankedBlock {
                band: EfficiencyBand::from_efficiency(r.efficiency),
                id: r.id,
                title: r.title,
                completed: r.completed,
                efficiency: r.efficiency,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerSet;
    use crate::catalog::{Block, BlockCatalog};

    fn bare_block(id: &str) -> Block {
        Block {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            questions: vec![],
        }
    }

    fn catalog(ids: &[&str]) -> BlockCatalog {
        BlockCatalog {
            blocks: ids.iter().map(|id| bare_block(id)).collect(),
        }
    }

    fn completed(id: &str, correct: u32, incorrect: u32) -> BlockResult {
        BlockResult {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            completed: true,
            efficiency: Some(efficiency_pct(correct, correct + incorrect)),
            correct,
            incorrect,
            completed_at: Some(0),
            answers: AnswerSet::new(),
        }
    }

    #[test]
    fn overall_efficiency_is_weighted_by_answer_counts() {
        let catalog = catalog(&["a", "b"]);
        let results = vec![completed("a", 1, 0), completed("b", 0, 9)];
        let summary = summarize(&catalog, &results, &[]);
        // 1 correct of 10 answered, not the 50% a simple average would give.
        assert_eq!(summary.overall_efficiency, 10);
    }

    #[test]
    fn equal_weights_match_the_simple_average() {
        let catalog = catalog(&["a", "b"]);
        let results = vec![completed("a", 10, 0), completed("b", 0, 10)];
        let summary = summarize(&catalog, &results, &[]);
        assert_eq!(summary.overall_efficiency, 50);
    }

    #[test]
    fn weak_threshold_is_strictly_below_78() {
        let catalog = catalog(&["a", "b", "c", "d"]);
        let results = vec![
            completed("a", 37, 63),  // 37 -> weak
            completed("b", 38, 62),  // 38 -> weak (still below 78)
            completed("c", 77, 23),  // 77 -> weak
            completed("d", 78, 22),  // 78 -> not weak
        ];
        let summary = summarize(&catalog, &results, &[]);
        assert_eq!(summary.weak_block_count, 3);
    }

    #[test]
    fn ranking_sorts_ascending_and_keeps_catalog_order_on_ties() {
        let catalog = catalog(&["a", "b", "c", "d"]);
        let results = vec![
            completed("a", 5, 5), // 50
            completed("b", 9, 1), // 90
            completed("c", 5, 5), // 50, ties with a
        ];
        let summary = summarize(&catalog, &results, &[]);
        let order: Vec<_> = summary.ranked_blocks.iter().map(|r| r.id.as_str()).collect();
        // d is not completed, sorts as 0 at the front; a before c on the tie.
        assert_eq!(order, vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn padding_covers_the_full_catalog() {
        let catalog = catalog(&["a", "b", "c"]);
        let results = vec![completed("b", 1, 1)];
        let summary = summarize(&catalog, &results, &[]);
        assert_eq!(summary.ranked_blocks.len(), 3);
        assert_eq!(summary.completed_block_count, 1);
        let placeholder = summary.ranked_blocks.iter().find(|r| r.id == "a").unwrap();
        assert!(!placeholder.completed);
        assert!(placeholder.efficiency.is_none());
    }

    #[test]
    fn no_completed_blocks_scores_zero_overall() {
        let catalog = catalog(&["a"]);
        let summary = summarize(&catalog, &[], &[]);
        assert_eq!(summary.overall_efficiency, 0);
        assert_eq!(summary.weak_block_count, 0);
    }

    #[test]
    fn band_cutoffs_are_exact() {
        assert_eq!(EfficiencyBand::from_efficiency(Some(0)), EfficiencyBand::Critical);
        assert_eq!(EfficiencyBand::from_efficiency(Some(37)), EfficiencyBand::Critical);
        assert_eq!(EfficiencyBand::from_efficiency(Some(38)), EfficiencyBand::Moderate);
        assert_eq!(EfficiencyBand::from_efficiency(Some(77)), EfficiencyBand::Moderate);
        assert_eq!(EfficiencyBand::from_efficiency(Some(78)), EfficiencyBand::Good);
        assert_eq!(EfficiencyBand::from_efficiency(Some(100)), EfficiencyBand::Good);
        assert_eq!(EfficiencyBand::from_efficiency(None), EfficiencyBand::Neutral);
    }

    #[test]
    fn task_count_includes_completed_tasks() {
        use crate::catalog::Priority;
        use crate::recommend::Task;

        let catalog = catalog(&["a"]);
        let mut task = Task {
            id: "t1".to_string(),
            title: "t".to_string(),
            description: String::new(),
            priority: Priority::Low,
            category: "c".to_string(),
            block_id: "a".to_string(),
            block_title: "A".to_string(),
            completed: false,
        };
        let open = task.clone();
        task.id = "t2".to_string();
        task.completed = true;
        let summary = summarize(&catalog, &[], &[open, task]);
        assert_eq!(summary.total_task_count, 2);
    }
}
