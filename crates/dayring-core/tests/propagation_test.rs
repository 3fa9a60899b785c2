//! Integration tests for completion propagation and command dispatch.
//!
//! Each test builds an isolated temp-dir-backed store, drives it through
//! the dispatch layer, and checks both the in-memory state and what a
//! fresh store loads from disk.

use chrono::Utc;

use dayring_core::{Action, CompletionPropagator, Outcome, UpwardPolicy, dispatch};
use dayring_store::{Horizon, Plan, PlanStore, StoreError};
use dayring_test_utils::{date, new_plan, temp_store};

// -----------------------------------------------------------------------
// Test helpers
// -----------------------------------------------------------------------

fn create_plan(store: &mut PlanStore, horizon: Horizon, subtasks: &[&str]) -> Plan {
    store
        .create(horizon, new_plan("fixture", date(2025, 6, 2), subtasks), Utc::now())
        .expect("fixture plan should be created")
}

fn toggle_subtask(
    store: &mut PlanStore,
    propagator: &CompletionPropagator,
    horizon: Horizon,
    id: &str,
    index: usize,
    completed: bool,
) {
    dispatch(
        store,
        propagator,
        Action::SetSubtask {
            horizon,
            id: id.to_owned(),
            index,
            completed,
        },
        Utc::now(),
    )
    .expect("sub-task toggle should succeed");
}

// -----------------------------------------------------------------------
// Upward propagation
// -----------------------------------------------------------------------

#[test]
fn daily_plan_completes_when_last_subtask_completes() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Daily, &["Outline", "Draft", "Edit"]);

    toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, 0, true);
    toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, 1, true);
    assert!(!store.get(Horizon::Daily, &plan.id).unwrap().completed);

    toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, 2, true);
    assert!(store.get(Horizon::Daily, &plan.id).unwrap().completed);
}

#[test]
fn daily_plan_uncompletes_when_a_subtask_is_cleared() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Daily, &["a", "b"]);

    toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, 0, true);
    toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, 1, true);
    assert!(store.get(Horizon::Daily, &plan.id).unwrap().completed);

    toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, 1, false);
    assert!(!store.get(Horizon::Daily, &plan.id).unwrap().completed);
}

#[test]
fn plan_completed_always_matches_subtask_state_on_daily() {
    // After any sequence of toggles, completed == non-empty && all-completed.
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Daily, &["a", "b", "c"]);

    let sequence = [
        (0, true),
        (2, true),
        (0, false),
        (1, true),
        (0, true),
        (2, false),
        (2, true),
    ];
    for (index, completed) in sequence {
        toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, index, completed);
        let current = store.get(Horizon::Daily, &plan.id).unwrap();
        assert_eq!(
            current.completed,
            !current.subtasks.is_empty() && current.subtasks.iter().all(|s| s.completed),
            "invariant broken after toggling index {index} to {completed}"
        );
    }
}

#[test]
fn week_plans_accumulate_subtask_state_without_deriving_completion() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Week, &["a", "b"]);

    toggle_subtask(&mut store, &propagator, Horizon::Week, &plan.id, 0, true);
    toggle_subtask(&mut store, &propagator, Horizon::Week, &plan.id, 1, true);

    let current = store.get(Horizon::Week, &plan.id).unwrap();
    assert!(current.subtasks.iter().all(|s| s.completed));
    assert!(
        !current.completed,
        "daily-only policy must not derive completion for week plans"
    );
}

#[test]
fn all_horizons_policy_derives_completion_everywhere() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::new(UpwardPolicy::AllHorizons);

    for horizon in Horizon::ALL {
        let plan = create_plan(&mut store, horizon, &["only"]);
        toggle_subtask(&mut store, &propagator, horizon, &plan.id, 0, true);
        assert!(
            store.get(horizon, &plan.id).unwrap().completed,
            "bucket {horizon} should derive completion under AllHorizons"
        );
    }
}

#[test]
fn subtask_toggle_on_zero_subtask_plan_is_rejected() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Daily, &[]);

    let result = propagator.set_subtask(&mut store, Horizon::Daily, &plan.id, 0, true);
    assert!(matches!(result, Err(StoreError::SubtaskNotFound { .. })));
}

#[test]
fn subtask_toggle_out_of_range_is_rejected() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Daily, &["a"]);

    let result = propagator.set_subtask(&mut store, Horizon::Daily, &plan.id, 5, true);
    assert!(matches!(
        result,
        Err(StoreError::SubtaskNotFound { index: 5, .. })
    ));
}

// -----------------------------------------------------------------------
// Downward propagation
// -----------------------------------------------------------------------

#[test]
fn completing_a_plan_forces_all_subtasks_on_every_horizon() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();

    for horizon in Horizon::ALL {
        let plan = create_plan(&mut store, horizon, &["a", "b", "c"]);
        propagator
            .set_plan_completion(&mut store, horizon, &plan.id, true)
            .unwrap();

        let current = store.get(horizon, &plan.id).unwrap();
        assert!(current.completed);
        assert!(
            current.subtasks.iter().all(|s| s.completed),
            "bucket {horizon}: downward propagation must check every sub-task"
        );
    }
}

#[test]
fn unchecking_a_plan_clears_manually_completed_subtasks() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Month, &["a", "b"]);

    // Manually complete one sub-task, then toggle the plan off.
    toggle_subtask(&mut store, &propagator, Horizon::Month, &plan.id, 0, true);
    propagator
        .set_plan_completion(&mut store, Horizon::Month, &plan.id, false)
        .unwrap();

    let current = store.get(Horizon::Month, &plan.id).unwrap();
    assert!(!current.completed);
    assert!(
        current.subtasks.iter().all(|s| !s.completed),
        "un-checking the plan overwrites earlier manual completion"
    );
}

#[test]
fn zero_subtask_plan_toggles_by_direct_action_only() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Daily, &[]);

    propagator
        .set_plan_completion(&mut store, Horizon::Daily, &plan.id, true)
        .unwrap();
    assert!(store.get(Horizon::Daily, &plan.id).unwrap().completed);

    propagator
        .set_plan_completion(&mut store, Horizon::Daily, &plan.id, false)
        .unwrap();
    assert!(!store.get(Horizon::Daily, &plan.id).unwrap().completed);
}

// -----------------------------------------------------------------------
// Persistence of propagation results
// -----------------------------------------------------------------------

#[test]
fn propagation_results_survive_reload() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let plan = create_plan(&mut store, Horizon::Daily, &["a", "b"]);

    toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, 0, true);
    toggle_subtask(&mut store, &propagator, Horizon::Daily, &plan.id, 1, true);

    let reloaded = PlanStore::open(store.path());
    let current = reloaded.get(Horizon::Daily, &plan.id).unwrap();
    assert!(current.completed);
    assert!(current.subtasks.iter().all(|s| s.completed));
}

// -----------------------------------------------------------------------
// Dispatch surface
// -----------------------------------------------------------------------

#[test]
fn dispatch_covers_the_full_action_surface() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();
    let now = Utc::now();

    let created = match dispatch(
        &mut store,
        &propagator,
        Action::CreatePlan {
            horizon: Horizon::Daily,
            new: new_plan("Write report", date(2025, 6, 2), &["Outline"]),
        },
        now,
    )
    .unwrap()
    {
        Outcome::Created(plan) => plan,
        other => panic!("expected Created, got {other:?}"),
    };

    let change = match dispatch(
        &mut store,
        &propagator,
        Action::SetSubtask {
            horizon: Horizon::Daily,
            id: created.id.clone(),
            index: 0,
            completed: true,
        },
        now,
    )
    .unwrap()
    {
        Outcome::SubtaskSet(change) => change,
        other => panic!("expected SubtaskSet, got {other:?}"),
    };
    assert!(change.plan_completed);
    assert!(change.plan_flag_changed);

    match dispatch(
        &mut store,
        &propagator,
        Action::SetPlanCompletion {
            horizon: Horizon::Daily,
            id: created.id.clone(),
            completed: false,
        },
        now,
    )
    .unwrap()
    {
        Outcome::PlanCompletionSet => {}
        other => panic!("expected PlanCompletionSet, got {other:?}"),
    }

    let deleted = dispatch(
        &mut store,
        &propagator,
        Action::DeletePlan {
            horizon: Horizon::Daily,
            id: created.id.clone(),
        },
        now,
    )
    .unwrap();
    assert!(matches!(deleted, Outcome::Deleted(true)));

    // Deleting again reports false but still succeeds.
    let deleted = dispatch(
        &mut store,
        &propagator,
        Action::DeletePlan {
            horizon: Horizon::Daily,
            id: created.id,
        },
        now,
    )
    .unwrap();
    assert!(matches!(deleted, Outcome::Deleted(false)));
}

#[test]
fn dispatch_reports_stale_ids_on_toggles() {
    let (mut store, _tmp) = temp_store();
    let propagator = CompletionPropagator::default();

    let result = dispatch(
        &mut store,
        &propagator,
        Action::SetPlanCompletion {
            horizon: Horizon::Daily,
            id: "1717200000000".into(),
            completed: true,
        },
        Utc::now(),
    );
    assert!(matches!(result, Err(StoreError::PlanNotFound { .. })));
}
