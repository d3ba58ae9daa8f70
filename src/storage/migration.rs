use crate::catalog::BlockCatalog;
use crate::storage::store::KvStore;
use crate::storage::{answers_key, Dataset, Namespace};

/// Reparent anonymous diagnosis data onto a newly identified user.
///
/// Merge-if-absent copy: for each namespaced dataset whose per-user key does
/// not exist yet, the global value is copied verbatim into the per-user
/// namespace. Global keys are left untouched as a read-only source, which
/// makes repeat calls no-ops. Each key's copy is independent, so sequential
/// per-key check-then-copy is sufficient without a transaction primitive.
///
/// Failures are logged and swallowed: migration must never block the login
/// flow.
pub async fn migrate(store: &KvStore, user_id: &str) {
    let user_ns = Namespace::User(user_id.to_string());
    let mut copied = 0usize;

    for dataset in Dataset::NAMESPACED {
        let target = user_ns.key(dataset);
        if store.exists(&target).await {
            continue;
        }
        let Some(raw) = store.read_raw(dataset.global_key()).await else {
            continue;
        };
        if store.write_raw(&target, &raw).await {
            copied += 1;
        } else {
            tracing::warn!(
                user_id = user_id,
                dataset = ?dataset,
                "Migration copy failed, leaving global value in place"
            );
        }
    }

    tracing::info!(user_id = user_id, copied = copied, "Anonymous data migration finished");
}

/// Forget all diagnosis results.
///
/// Clears the global key family (history included), the per-user family when
/// a user id is given, and every block's raw answers. The separate
/// profile/credentials dataset is not touched.
pub async fn reset(store: &KvStore, catalog: &BlockCatalog, user_id: Option<&str>) {
    for dataset in Dataset::NAMESPACED {
        store.remove(dataset.global_key()).await;
        if let Some(id) = user_id {
            store.remove(&Namespace::User(id.to_string()).key(dataset)).await;
        }
    }
    store.remove(Dataset::History.global_key()).await;

    for block in &catalog.blocks {
        store.remove(&answers_key(&block.id)).await;
    }

    tracing::info!(user_id = ?user_id, "Diagnosis results reset");
}
