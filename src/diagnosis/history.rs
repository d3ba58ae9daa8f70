use serde::{Deserialize, Serialize};

use crate::progress::DiagnosisSummary;
use crate::storage::store::KvStore;
use crate::storage::Dataset;

/// One submitted run snapshot. The history list lives under the global
/// `userDiagnosisHistory` key in both sessions; the server-side sync keeps
/// it consistent across devices, not the namespace split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub submitted_at: i64,
    pub overall_efficiency: u8,
    pub weak_block_count: usize,
    pub total_task_count: usize,
    pub completed_block_count: usize,
}

impl HistoryEntry {
    pub fn from_summary(summary: &DiagnosisSummary, submitted_at: i64) -> Self {
        HistoryEntry {
            submitted_at,
            overall_efficiency: summary.overall_efficiency,
            weak_block_count: summary.weak_block_count,
            total_task_count: summary.total_task_count,
            completed_block_count: summary.completed_block_count,
        }
    }
}

/// Append a snapshot to the history list. Returns whether the write reached
/// storage; a miss reads as an empty history.
pub async fn append(store: &KvStore, entry: HistoryEntry) -> bool {
    let key = Dataset::History.global_key();
    let mut entries: Vec<HistoryEntry> = store.read_or_default(key).await;
    entries.push(entry);
    store.write(key, &entries).await
}

/// All submitted snapshots, oldest first.
pub async fn load(store: &KvStore) -> Vec<HistoryEntry> {
    store.read_or_default(Dataset::History.global_key()).await
}
