pub mod migration;
pub mod store;

use serde::{Deserialize, Serialize};

/// Logical persisted datasets. Each maps to one key family: a fixed global
/// key plus, for namespaced datasets, a `user_{id}_` prefixed counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dataset {
    /// Per-block diagnosis results.
    Blocks,
    /// Generated improvement tasks.
    Tasks,
    /// Flag set once every catalog block is completed.
    AllBlocksCompleted,
    /// Previous aggregate dashboard result.
    PreviousResult,
    /// Current aggregate dashboard result.
    CurrentResult,
    /// Submitted diagnosis snapshots. Server-synced, never namespace-split.
    History,
}

impl Dataset {
    /// Datasets that get a per-user counterpart and take part in migration.
    pub const NAMESPACED: [Dataset; 5] = [
        Dataset::Blocks,
        Dataset::Tasks,
        Dataset::AllBlocksCompleted,
        Dataset::PreviousResult,
        Dataset::CurrentResult,
    ];

    pub fn global_key(self) -> &'static str {
        match self {
            Dataset::Blocks => "diagnosisBlocks",
            Dataset::Tasks => "actionPlanTasks",
            Dataset::AllBlocksCompleted => "dashboardAllBlocksCompleted",
            Dataset::PreviousResult => "dashboardPreviousResult",
            Dataset::CurrentResult => "dashboardCurrentResult",
            Dataset::History => "userDiagnosisHistory",
        }
    }
}

/// The storage partition reads and writes target. Threaded explicitly
/// through every storage call so the migration boundary stays a visible
/// argument rather than ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Namespace {
    Global,
    User(String),
}

impl Namespace {
    /// The concrete storage key for a dataset in this namespace.
    /// History is server-synced and always resolves to its global key.
    pub fn key(&self, dataset: Dataset) -> String {
        match (self, dataset) {
            (_, Dataset::History) => dataset.global_key().to_string(),
            (Namespace::Global, _) => dataset.global_key().to_string(),
            (Namespace::User(user_id), _) => {
                format!("user_{}_{}", user_id, dataset.global_key())
            }
        }
    }
}

/// Key for a block's raw in-progress answers. Read and written regardless of
/// namespace; answers are transient per-device scratch state.
pub fn answers_key(block_id: &str) -> String {
    format!("diagnosis_answers_{}", block_id)
}
