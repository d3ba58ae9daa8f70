use restocheck::catalog::{AnswerOption, Block, BlockCatalog, Question};
use restocheck::diagnosis;
use restocheck::state::app::AppState;
use restocheck::state::session::{identify, UserSession};
use restocheck::storage::migration::{migrate, reset};
use restocheck::storage::store::KvStore;
use restocheck::storage::{answers_key, Dataset, Namespace};
use tempfile::tempdir;

fn yes_no_question(id: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: format!("prompt {}", id),
        options: vec![
            AnswerOption {
                id: format!("{}_yes", id),
                text: "yes".to_string(),
                value: "yes".to_string(),
                correct: true,
                recommendation: None,
            },
            AnswerOption {
                id: format!("{}_no", id),
                text: "no".to_string(),
                value: "no".to_string(),
                correct: false,
                recommendation: None,
            },
        ],
    }
}

fn two_block_catalog() -> BlockCatalog {
    BlockCatalog {
        blocks: vec![
            Block {
                id: "block_a".to_string(),
                title: "Block A".to_string(),
                description: String::new(),
                questions: vec![yes_no_question("a_q1")],
            },
            Block {
                id: "block_b".to_string(),
                title: "Block B".to_string(),
                description: String::new(),
                questions: vec![yes_no_question("b_q1")],
            },
        ],
    }
}

async fn seed_global(store: &KvStore) {
    store.write_raw(Dataset::Blocks.global_key(), r#"[{"id":"block_a"}]"#).await;
    store.write_raw(Dataset::Tasks.global_key(), r#"[{"id":"t1"}]"#).await;
    store.write_raw(Dataset::CurrentResult.global_key(), r#"{"overall":60}"#).await;
}

#[tokio::test]
async fn migrate_copies_global_values_into_the_user_namespace() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());
    seed_global(&store).await;

    migrate(&store, "u1").await;

    let user_ns = Namespace::User("u1".to_string());
    for dataset in [Dataset::Blocks, Dataset::Tasks, Dataset::CurrentResult] {
        assert_eq!(
            store.read_raw(&user_ns.key(dataset)).await,
            store.read_raw(dataset.global_key()).await,
            "{:?}", dataset
        );
    }
    // Datasets with no global value stay absent on the user side too.
    assert!(!store.exists(&user_ns.key(Dataset::PreviousResult)).await);
}

#[tokio::test]
async fn migrate_leaves_global_values_untouched() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());
    seed_global(&store).await;
    let before = store.read_raw(Dataset::Blocks.global_key()).await;

    migrate(&store, "u1").await;

    assert_eq!(store.read_raw(Dataset::Blocks.global_key()).await, before);
    assert_eq!(
        store.read_raw(Dataset::Tasks.global_key()).await,
        Some(r#"[{"id":"t1"}]"#.to_string())
    );
}

#[tokio::test]
async fn migrate_twice_is_identical_to_once() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());
    seed_global(&store).await;

    migrate(&store, "u1").await;
    let user_ns = Namespace::User("u1".to_string());
    let mut after_first = Vec::new();
    for dataset in Dataset::NAMESPACED {
        after_first.push(store.read_raw(&user_ns.key(dataset)).await);
    }

    // Mutate the global side between the two calls; a second run must not
    // re-copy over already-populated user keys.
    store.write_raw(Dataset::Blocks.global_key(), r#"[{"id":"changed"}]"#).await;
    migrate(&store, "u1").await;

    for (i, dataset) in Dataset::NAMESPACED.into_iter().enumerate() {
        assert_eq!(
            store.read_raw(&user_ns.key(dataset)).await,
            after_first[i],
            "{:?}", dataset
        );
    }
}

#[tokio::test]
async fn migrate_never_overwrites_existing_user_data() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());
    seed_global(&store).await;

    let user_key = Namespace::User("u1".to_string()).key(Dataset::Tasks);
    store.write_raw(&user_key, r#"[{"id":"already-mine"}]"#).await;

    migrate(&store, "u1").await;

    assert_eq!(
        store.read_raw(&user_key).await,
        Some(r#"[{"id":"already-mine"}]"#.to_string())
    );
}

// End to end: anonymous completion lands on global keys, login reparents it,
// and post-login completions land only on the per-user keys.
#[tokio::test]
async fn login_reparents_anonymous_data_and_splits_namespaces() {
    let dir = tempdir().unwrap();
    let state = AppState::with_catalog(KvStore::new(dir.path()), two_block_catalog());

    // Anonymous user completes block A.
    let outcome = diagnosis::record_answer(&state, "block_a", "a_q1", "yes")
        .await
        .unwrap();
    assert!(outcome.block_completed);

    let global_blocks_before = state
        .store
        .read_raw(Dataset::Blocks.global_key())
        .await
        .expect("global results populated");

    // Registration resolves a user id.
    let transitioned = identify(&state, "u7").await;
    assert!(transitioned);
    assert_eq!(
        state.current_session(),
        UserSession::Identified { user_id: "u7".to_string() }
    );

    let user_ns = Namespace::User("u7".to_string());
    assert_eq!(
        state.store.read_raw(&user_ns.key(Dataset::Blocks)).await,
        Some(global_blocks_before.clone())
    );

    // A second block completed after registration is per-user only.
    diagnosis::record_answer(&state, "block_b", "b_q1", "no")
        .await
        .unwrap();

    let user_results = diagnosis::load_results(&state).await;
    assert_eq!(user_results.len(), 2);

    // The global namespace still holds only the pre-registration value.
    assert_eq!(
        state.store.read_raw(Dataset::Blocks.global_key()).await,
        Some(global_blocks_before)
    );
}

#[tokio::test]
async fn reset_clears_both_namespaces_and_answers() {
    let dir = tempdir().unwrap();
    let catalog = two_block_catalog();
    let store = KvStore::new(dir.path());
    seed_global(&store).await;
    store.write_raw(&answers_key("block_a"), r#"{"entries":[]}"#).await;
    let user_key = Namespace::User("u1".to_string()).key(Dataset::Blocks);
    store.write_raw(&user_key, r#"[{"id":"block_a"}]"#).await;

    reset(&store, &catalog, Some("u1")).await;

    assert!(!store.exists(Dataset::Blocks.global_key()).await);
    assert!(!store.exists(Dataset::Tasks.global_key()).await);
    assert!(!store.exists(Dataset::History.global_key()).await);
    assert!(!store.exists(&user_key).await);
    assert!(!store.exists(&answers_key("block_a")).await);
}
