use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config;
use crate::diagnosis::history::HistoryEntry;
use crate::diagnosis::BlockResult;
use crate::error::DiagError;
use crate::progress::AggregateResult;
use crate::recommend::Task;
use crate::state::app::AppState;
use crate::storage::Dataset;

/// The blob pushed to and pulled from the sync service.
///
/// Explicitly versioned and tagged: consumers (the admin surface included)
/// match on the `schema` variant instead of probing alternative property
/// names, and every field is named and optional-tolerant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "schema")]
pub enum Snapshot {
    #[serde(rename = "v1")]
    V1(SnapshotV1),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotV1 {
    #[serde(default)]
    pub blocks: Vec<BlockResult>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub all_blocks_completed: bool,
    #[serde(default)]
    pub previous_result: Option<AggregateResult>,
    #[serde(default)]
    pub current_result: Option<AggregateResult>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Everything the current namespace holds, gathered for a push. The remote
/// end is a black-box snapshot store; no field-by-field merging happens
/// here or there.
pub async fn collect_snapshot(state: &AppState) -> Snapshot {
    let namespace = state.resolve_namespace();
    let store = &state.store;

    Snapshot::V1(SnapshotV1 {
        blocks: store.read_or_default(&namespace.key(Dataset::Blocks)).await,
        tasks: store.read_or_default(&namespace.key(Dataset::Tasks)).await,
        all_blocks_completed: store
            .read_or_default(&namespace.key(Dataset::AllBlocksCompleted))
            .await,
        previous_result: store.read(&namespace.key(Dataset::PreviousResult)).await,
        current_result: store.read(&namespace.key(Dataset::CurrentResult)).await,
        history: store.read_or_default(&namespace.key(Dataset::History)).await,
    })
}

/// Thin client for the external snapshot sync service. The caller decides
/// when to push or pull; the core never syncs on its own.
#[derive(Debug, Clone)]
pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
}

impl SyncClient {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        SyncClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client pointed at the configured sync service.
    pub fn from_config() -> Self {
        SyncClient::new(config::get_config().sync_base_url.clone())
    }

    /// Upsert the user's snapshot blob.
    pub async fn push(&self, user_id: &str, snapshot: &Snapshot) -> Result<(), DiagError> {
        let url = format!("{}/sync/push", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "userId": user_id, "data": snapshot }))
            .send()
            .await?;
        response
            .error_for_status()
            .map_err(|e| DiagError::from(e).with_context(format!("user_id: {}", user_id)))?;

        tracing::info!(user_id = user_id, "Snapshot pushed");
        Ok(())
    }

    /// Fetch the last pushed blob. A not-found response resolves to None;
    /// anything else unexpected is an error for the caller to handle.
    pub async fn pull(&self, user_id: &str) -> Result<Option<Snapshot>, DiagError> {
        let url = format!("{}/sync/pull/{}", self.base_url, user_id);
        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|e| DiagError::from(e).with_context(format!("user_id: {}", user_id)))?;

        let snapshot = response.json::<Snapshot>().await?;
        Ok(Some(snapshot))
    }
}
