//! Integration tests for the plan store: persistence round-trips, schema
//! defaulting, and degradation on malformed input.
//!
//! Each test owns a temporary directory, so tests are fully isolated and
//! idempotent.

use chrono::Utc;

use dayring_store::{Horizon, PlanStore, PlanUpdate, Subtask};
use dayring_test_utils::{date, new_plan, noon, temp_store};

// -----------------------------------------------------------------------
// Round-trips
// -----------------------------------------------------------------------

#[test]
fn persist_then_load_reproduces_the_document() {
    let (mut store, _tmp) = temp_store();

    store
        .create(
            Horizon::Daily,
            new_plan("Write report", date(2025, 6, 2), &["Outline", "Draft", "Edit"]),
            noon(2025, 6, 1),
        )
        .unwrap();
    store
        .create(
            Horizon::Week,
            new_plan("Ship release", date(2025, 6, 6), &[]),
            noon(2025, 6, 1),
        )
        .unwrap();
    store
        .create(
            Horizon::Year,
            new_plan("Learn piano", date(2025, 12, 31), &["Scales"]),
            noon(2025, 6, 1),
        )
        .unwrap();

    // A fresh store against the same file sees an observably identical
    // document: same ids, same ordering, same field values.
    let reloaded = PlanStore::open(store.path());
    for horizon in Horizon::ALL {
        let original = store.bucket(horizon);
        let loaded = reloaded.bucket(horizon);
        assert_eq!(original.len(), loaded.len(), "bucket {horizon}");
        for (a, b) in original.iter().zip(loaded) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.title, b.title);
            assert_eq!(a.deadline, b.deadline);
            assert_eq!(a.subtasks, b.subtasks);
            assert_eq!(a.completed, b.completed);
            assert_eq!(a.created_at, b.created_at);
        }
    }
}

#[test]
fn mutations_are_visible_after_reload() {
    let (mut store, _tmp) = temp_store();

    let plan = store
        .create(
            Horizon::Month,
            new_plan("Budget review", date(2025, 6, 30), &["Collect statements"]),
            Utc::now(),
        )
        .unwrap();

    store
        .update(
            Horizon::Month,
            &plan.id,
            PlanUpdate {
                title: "Budget review (Q2)".into(),
                deadline: date(2025, 7, 15),
                subtasks: vec![Subtask::new("Collect statements"), Subtask::new("Summarize")],
                completed: false,
            },
        )
        .unwrap();

    let reloaded = PlanStore::open(store.path());
    let found = reloaded.get(Horizon::Month, &plan.id).expect("plan survives reload");
    assert_eq!(found.title, "Budget review (Q2)");
    assert_eq!(found.deadline, date(2025, 7, 15));
    assert_eq!(found.subtasks.len(), 2);
}

#[test]
fn delete_persists_and_stays_idempotent() {
    let (mut store, _tmp) = temp_store();

    let plan = store
        .create(
            Horizon::Daily,
            new_plan("Short-lived", date(2025, 6, 1), &[]),
            Utc::now(),
        )
        .unwrap();
    let keeper = store
        .create(
            Horizon::Daily,
            new_plan("Keeper", date(2025, 6, 1), &[]),
            Utc::now(),
        )
        .unwrap();

    assert!(store.delete(Horizon::Daily, &plan.id).unwrap());

    // Deleting a nonexistent id is a no-op that does not alter bucket length.
    assert!(!store.delete(Horizon::Daily, "does-not-exist").unwrap());
    assert_eq!(store.bucket(Horizon::Daily).len(), 1);

    let reloaded = PlanStore::open(store.path());
    assert!(reloaded.get(Horizon::Daily, &plan.id).is_none());
    assert!(reloaded.get(Horizon::Daily, &keeper.id).is_some());
}

// -----------------------------------------------------------------------
// Degradation and schema defaulting
// -----------------------------------------------------------------------

#[test]
fn malformed_document_degrades_to_empty_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("plans.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let store = PlanStore::open(&path);
    assert!(store.is_empty(), "malformed input absorbs to empty buckets");
    for horizon in Horizon::ALL {
        assert!(store.bucket(horizon).is_empty());
    }
}

#[test]
fn document_predating_the_daily_bucket_loads_cleanly() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("plans.json");
    std::fs::write(
        &path,
        r#"{
  "week": [
    {
      "id": "1717200000000",
      "title": "Old week plan",
      "deadline": "2024-06-07",
      "subtasks": [{"text": "step", "completed": true}],
      "completed": false,
      "created_at": "2024-06-01T08:00:00Z"
    }
  ],
  "month": [],
  "year": []
}"#,
    )
    .unwrap();

    let store = PlanStore::open(&path);
    assert_eq!(store.bucket(Horizon::Week).len(), 1);
    assert!(store.bucket(Horizon::Daily).is_empty(), "absent key means empty bucket");
    assert_eq!(
        store.get(Horizon::Week, "1717200000000").unwrap().title,
        "Old week plan"
    );
}

#[test]
fn missing_file_yields_empty_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = PlanStore::open(tmp.path().join("never-written.json"));
    assert!(store.is_empty());
}

// -----------------------------------------------------------------------
// Ordering
// -----------------------------------------------------------------------

#[test]
fn bucket_preserves_insertion_order() {
    let (mut store, _tmp) = temp_store();

    for (i, title) in ["first", "second", "third"].iter().enumerate() {
        store
            .create(
                Horizon::Week,
                new_plan(title, date(2025, 6, 6), &[]),
                noon(2025, 6, 1) + chrono::Duration::milliseconds(i as i64),
            )
            .unwrap();
    }

    let titles: Vec<&str> = store
        .bucket(Horizon::Week)
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);

    let reloaded = PlanStore::open(store.path());
    let titles: Vec<&str> = reloaded
        .bucket(Horizon::Week)
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}
