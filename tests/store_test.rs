use restocheck::storage::store::KvStore;
use tempfile::tempdir;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
struct Payload {
    items: Vec<String>,
}

#[tokio::test]
async fn missing_key_reads_as_default() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());

    let value: Payload = store.read_or_default("absent").await;
    assert_eq!(value, Payload::default());
    assert!(!store.exists("absent").await);
}

#[tokio::test]
async fn write_then_read_roundtrips() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());

    let payload = Payload {
        items: vec!["a".to_string(), "b".to_string()],
    };
    assert!(store.write("payload", &payload).await);
    assert!(store.exists("payload").await);

    let back: Payload = store.read_or_default("payload").await;
    assert_eq!(back, payload);
}

#[tokio::test]
async fn malformed_value_reads_as_default() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());

    assert!(store.write_raw("broken", "{not json at all").await);
    let value: Payload = store.read_or_default("broken").await;
    assert_eq!(value, Payload::default());
}

#[tokio::test]
async fn remove_is_tolerant_of_absent_keys() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());

    assert!(store.write_raw("k", "1").await);
    assert!(store.remove("k").await);
    assert!(!store.exists("k").await);
    // Removing again is still a success.
    assert!(store.remove("k").await);
}

// Documents the accepted single-device limitation: two writers racing on
// one key are not merged, the last write wins wholesale.
#[tokio::test]
async fn concurrent_writers_are_last_write_wins() {
    let dir = tempdir().unwrap();
    let store = KvStore::new(dir.path());

    let first = Payload {
        items: vec!["from-screen-one".to_string()],
    };
    let second = Payload {
        items: vec!["from-screen-two".to_string()],
    };
    assert!(store.write("shared", &first).await);
    assert!(store.write("shared", &second).await);

    let back: Payload = store.read_or_default("shared").await;
    assert_eq!(back, second, "no merge happens, the later write replaces the earlier one");
}
