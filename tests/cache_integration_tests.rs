//! Integration Tests for the Cache and its Instrumentation
//!
//! Exercises the public API end to end against the in-memory backend.

use redis_basic::instrument::replay_to;
use redis_basic::{
    Backend, Cache, CacheError, MemoryBackend, Operation, OperationId, Recorded, Value,
};
use serde_json::json;

// == Helper Functions ==

async fn create_test_cache() -> Cache<MemoryBackend> {
    Cache::new(MemoryBackend::new()).await.unwrap()
}

// == Store / Get ==

#[tokio::test]
async fn test_store_then_get_each_value_type() {
    let cache = create_test_cache().await;

    let text = cache.store("foo").await.unwrap();
    let bytes = cache.store(vec![0u8, 159, 146, 150]).await.unwrap();
    let int = cache.store(123).await.unwrap();
    let float = cache.store(0.1).await.unwrap();

    assert_eq!(cache.get_str(&text).await.unwrap(), Some("foo".to_string()));
    assert_eq!(
        cache.get(&bytes).await.unwrap(),
        Some(vec![0u8, 159, 146, 150])
    );
    assert_eq!(cache.get_int(&int).await.unwrap(), Some(123));
    assert_eq!(cache.get_float(&float).await.unwrap(), Some(0.1));
}

#[tokio::test]
async fn test_get_str_on_binary_fails_loudly() {
    let cache = create_test_cache().await;

    let key = cache.store(vec![0xffu8, 0xfe]).await.unwrap();
    let result = cache.get_str(&key).await;
    assert!(matches!(result, Err(CacheError::Decode(_))));
}

#[tokio::test]
async fn test_new_cache_wipes_shared_backend() {
    let backend = MemoryBackend::new();
    let first = Cache::new(backend.clone()).await.unwrap();
    let key = first.store("kept?").await.unwrap();

    let _second = Cache::new(backend).await.unwrap();
    assert_eq!(first.get(&key).await.unwrap(), None);
}

// == Instrumentation ==

#[tokio::test]
async fn test_store_three_values_scenario() {
    let cache = create_test_cache().await;
    let store = cache.instrumented_store();

    let key_a = store.call((Value::from("a"),)).await.unwrap();
    let key_b = store.call((Value::from("b"),)).await.unwrap();
    let key_c = store.call((Value::from("c"),)).await.unwrap();

    // Counter lives in the same store, readable as a plain integer
    assert_eq!(cache.get_int("Cache.store").await.unwrap(), Some(3));

    let backend = cache.backend();
    let inputs = backend.lrange("Cache.store:inputs", 0, -1).await.unwrap();
    assert_eq!(
        inputs,
        vec![
            br#"["a"]"#.to_vec(),
            br#"["b"]"#.to_vec(),
            br#"["c"]"#.to_vec()
        ]
    );

    let replay = store.history().await.unwrap();
    let outputs: Vec<_> = replay.calls.iter().map(|c| c.output.clone()).collect();
    assert_eq!(
        outputs,
        vec![Some(json!(key_a)), Some(json!(key_b)), Some(json!(key_c))]
    );
}

#[tokio::test]
async fn test_replay_output() {
    let cache = create_test_cache().await;
    let store = cache.instrumented_store();

    let key_foo = store.call((Value::from("foo"),)).await.unwrap();
    let key_int = store.call((Value::from(42),)).await.unwrap();

    let mut out = Vec::new();
    let replay = replay_to(&store, &mut out).await.unwrap();
    assert_eq!(replay.len(), 2);

    let printed = String::from_utf8(out).unwrap();
    let expected = format!(
        "Cache.store was called 2 times:\n\
         Cache.store(\"foo\") -> \"{}\"\n\
         Cache.store(42) -> \"{}\"\n",
        key_foo, key_int
    );
    assert_eq!(printed, expected);
}

#[tokio::test]
async fn test_replay_counts_inputs_not_counter() {
    let cache = create_test_cache().await;
    let store = cache.instrumented_store();
    store.call((Value::from("x"),)).await.unwrap();

    // Bump the counter behind the history's back
    cache.backend().incr("Cache.store").await.unwrap();

    assert_eq!(store.calls().await.unwrap(), 2);
    assert_eq!(store.history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_history_reads_the_operations_own_store() {
    let cache_a = create_test_cache().await;
    let cache_b = create_test_cache().await;
    let store_a = cache_a.instrumented_store();
    let store_b = cache_b.instrumented_store();

    store_a.call((Value::from("only in a"),)).await.unwrap();

    assert_eq!(store_a.history().await.unwrap().len(), 1);
    assert!(store_b.history().await.unwrap().is_empty());

    let mut out = Vec::new();
    replay_to(&store_a, &mut out).await.unwrap();
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("Cache.store(\"only in a\")"));
}

#[tokio::test]
async fn test_custom_operation_identity() {
    let cache = create_test_cache().await;
    let renamed = cache.instrument(RenamedStore {
        cache: cache.clone(),
        id: OperationId::new("Inventory.put"),
    });

    renamed.call((Value::from("widget"),)).await.unwrap();

    assert_eq!(cache.get_int("Inventory.put").await.unwrap(), Some(1));
    assert_eq!(cache.get("Cache.store").await.unwrap(), None);
    assert_eq!(renamed.history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_instrumented_calls() {
    let cache = create_test_cache().await;

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cache = cache.clone();
            tokio::spawn(async move {
                let store = cache.instrumented_store();
                for i in 0..5 {
                    store
                        .call((Value::from(format!("{}-{}", worker, i)),))
                        .await
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let store = cache.instrumented_store();
    assert_eq!(store.calls().await.unwrap(), 40);

    let replay = store.history().await.unwrap();
    assert_eq!(replay.len(), 40);
    assert!(replay.calls.iter().all(|c| c.output.is_some()));
}

// == Test Operation ==

/// Store under a caller-chosen operation identity.
struct RenamedStore {
    cache: Cache<MemoryBackend>,
    id: OperationId,
}

#[async_trait::async_trait]
impl Operation for RenamedStore {
    type Args = (Value,);
    type Output = String;

    fn id(&self) -> &OperationId {
        &self.id
    }

    async fn call(&self, args: Self::Args) -> redis_basic::Result<String> {
        let (value,) = args;
        self.cache.store(value).await
    }
}
