//! Integration Tests for the App Memory Crate
//!
//! Tests full pool → remember → recall flows over the public API.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{json, Value};

use app_memory::memory::clock::now_ms;
use app_memory::{AppMemory, MemoryConfig, MemoryError, MemoryPool, MemoryStore};

// == Helper Functions ==

fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app_memory=debug".into()),
        )
        .try_init();
}

fn user_pool(family: &str) -> MemoryPool {
    init_logs();

    let mut pool = MemoryPool::new();
    pool.init(family, &MemoryConfig::default()).unwrap();
    pool
}

fn loaded_users() -> Value {
    json!([
        {"id": 1, "name": "Alex"},
        {"id": 2, "age": 21},
        {"name": "Mary", "age": 23}
    ])
}

/// Fills the gaps in partial user records, the way an application-side
/// normalizer would.
fn format_users(batch: Vec<Value>) -> Vec<Value> {
    batch
        .into_iter()
        .map(|user| {
            json!({
                "id": user.get("id").cloned().unwrap_or(json!(0)),
                "name": user.get("name").cloned().unwrap_or(json!("Unnamed")),
                "age": user.get("age").cloned().unwrap_or(Value::Null),
            })
        })
        .collect()
}

// == Remember / Recall Tests ==

#[test]
fn test_simple_save_and_recall() {
    let mut pool = user_pool("users");

    pool.require("users").unwrap().remember(loaded_users(), None);

    let recalled = pool.get("users").unwrap().recall(None, false).unwrap();
    let expected: Vec<Option<Value>> = loaded_users()
        .as_array()
        .unwrap()
        .iter()
        .cloned()
        .map(Some)
        .collect();
    assert_eq!(recalled, expected);
}

#[test]
fn test_save_with_normalization_and_insight() {
    let mut pool = user_pool("users");
    let query = json!({"find": "new", "count": 3});

    let counted = Rc::new(RefCell::new(0usize));
    let counted_by_insight = Rc::clone(&counted);

    let mem = pool.require("users").unwrap();
    mem.add_normalizer(format_users);
    mem.add_insight(move |recalled| {
        *counted_by_insight.borrow_mut() = recalled.map(|images| images.len()).unwrap_or(0);
    });
    mem.remember(loaded_users(), Some(&query));

    let recalled = mem.recall(Some(&query), false).unwrap();
    assert_eq!(recalled.len(), 3);
    assert_eq!(*counted.borrow(), 3);
    assert_eq!(
        recalled,
        vec![
            Some(json!({"id": 1, "name": "Alex", "age": null})),
            Some(json!({"id": 2, "name": "Unnamed", "age": 21})),
            Some(json!({"id": 0, "name": "Mary", "age": 23})),
        ]
    );
}

#[test]
fn test_recall_with_relevance_stamps() {
    let mut pool = user_pool("users");
    let before = now_ms();

    pool.require("users").unwrap().remember(loaded_users(), None);

    let recalled = pool
        .get("users")
        .unwrap()
        .recall_with_relevance(None, false)
        .unwrap();
    assert_eq!(recalled.len(), 3);
    for (image, stamp) in recalled {
        assert!(image.is_some());
        assert!(stamp.unwrap() >= before);
    }
}

#[test]
fn test_remembering_serializable_records() {
    #[derive(Serialize)]
    struct User {
        id: u64,
        name: String,
    }

    let mut pool = user_pool("users");
    let records = vec![
        User { id: 1, name: "Alex".to_string() },
        User { id: 2, name: "Mary".to_string() },
    ];

    let keys = pool
        .require("users")
        .unwrap()
        .remember(serde_json::to_value(records).unwrap(), None);

    assert_eq!(keys, vec![Some("1".to_string()), Some("2".to_string())]);
    assert_eq!(
        pool.get("users").unwrap().store().pull("2"),
        Some(json!({"id": 2, "name": "Mary"}))
    );
}

// == Irrelevance Tests ==

#[test]
fn test_marking_class_irrelevant_gates_recall() {
    let mut pool = user_pool("users");

    let mem = pool.require("users").unwrap();
    mem.remember(loaded_users(), None);
    mem.mark_irrelevant(None);

    assert_eq!(mem.recall(None, false), None);
    assert_eq!(mem.recall(None, true).unwrap().len(), 3);
    assert_eq!(mem.recall_with_relevance(None, true).unwrap().len(), 3);
}

#[test]
fn test_recalling_irrelevant_by_class_and_overall() {
    let mut pool = user_pool("users");
    let query = json!("addition");

    let mem = pool.require("users").unwrap();
    mem.remember(loaded_users(), None);
    mem.mark_irrelevant(None);

    assert_eq!(mem.recall(None, false), None);
    assert_eq!(mem.recall_irrelevant(None, None).unwrap().len(), 3);

    mem.remember(json!({"id": 4}), Some(&query));
    mem.mark_irrelevant(Some(&query));

    assert_eq!(mem.recall_irrelevant(None, None).unwrap().len(), 3);
    assert_eq!(mem.recall_all_irrelevant(None).len(), 4);
}

#[test]
fn test_marking_single_images() {
    let mut pool = user_pool("users");

    let mem = pool.require("users").unwrap();
    let keys = mem.remember(loaded_users(), None);
    let first_key = keys[0].as_ref().unwrap();

    assert_eq!(mem.mark_irrelevant_key(first_key), Some(true));
    assert_eq!(
        mem.mark_irrelevant_image(&json!({"id": 2, "age": 21})),
        Some(true)
    );
    assert_eq!(mem.mark_irrelevant_key("ghost"), None);

    assert_eq!(mem.recall_irrelevant(None, None).unwrap().len(), 2);
}

// == Store-Level Tests ==

#[test]
fn test_long_memory_spans_batches() {
    let mut pool = user_pool("users");

    let mem = pool.require("users").unwrap();
    mem.remember(loaded_users(), None);
    mem.remember(json!({"id": 4}), None);

    // The second remember replaced the class view but not the long memory
    assert_eq!(mem.recall(None, true).unwrap().len(), 1);
    assert_eq!(mem.store().pull_all().len(), 4);
}

#[test]
fn test_mixed_identity_key_derivation() {
    init_logs();
    let mut store = MemoryStore::default();
    let third = json!({"name": "Mary", "age": 23});

    for user in loaded_users().as_array().unwrap() {
        store.save(user.clone(), None, Some(now_ms()));
    }

    assert_eq!(
        store.class_keys(None).unwrap(),
        ["1".to_string(), "2".to_string(), third.to_string()]
    );
}

#[test]
fn test_class_relevance_is_bounded_by_oldest_member() {
    init_logs();
    let mut store = MemoryStore::new(32, 1);
    let t0 = now_ms();

    store.save(json!({"id": "x"}), Some("c1"), Some(t0));
    let key_y = store
        .save(json!({"id": "y"}), Some("c1"), Some(t0 + 1000))
        .unwrap();

    assert_eq!(
        store.is_class_relevant(Some("c1"), Some(t0 + 1500), None),
        Some(false)
    );
    assert!(store.is_relevant(&key_y, Some(t0 + 1500), Some(1)));
}

#[test]
fn test_key_length_limit_is_overshot_not_met() {
    init_logs();
    let config = MemoryConfig {
        max_key_length: 9,
        relevance_window: 60,
    };
    let mut app = AppMemory::new(&config);

    let keys = app.remember(json!("abcdefghij"), None);
    let key = keys[0].as_ref().unwrap();

    assert!(key.len() >= 10);
    assert_ne!(key, "abcdefghij");
}

// == Pool Lifecycle Tests ==

#[test]
fn test_pool_lifecycle() {
    let mut pool = user_pool("users");

    assert!(pool.has("users"));
    assert!(!pool.has("orders"));

    let reinit = pool.init("users", &MemoryConfig::default());
    assert!(matches!(reinit, Err(MemoryError::FamilyExists(_))));

    let unknown = pool.require("orders");
    assert!(matches!(unknown, Err(MemoryError::UnknownFamily(_))));
}

#[test]
fn test_pool_families_do_not_share_memory() {
    let mut pool = user_pool("users");
    pool.init("orders", &MemoryConfig::default()).unwrap();

    pool.require("users").unwrap().remember(loaded_users(), None);

    assert_eq!(pool.get("orders").unwrap().recall(None, false), None);
    assert!(pool.get("users").unwrap().recall(None, false).is_some());
}
