//! Completion propagation between sub-tasks and their parent plan.
//!
//! Keeps the two completion levels mutually consistent under two distinct
//! triggers, and guarantees each trigger ends in exactly one persist:
//!
//! ```text
//! sub-task toggled  --(upward)-->   plan.completed recomputed from
//!                                   all-sub-tasks-completed
//! plan toggled      --(downward)--> every sub-task forced to the
//!                                   plan's new value
//! ```
//!
//! Upward propagation only fires for plans whose sub-task list is non-empty;
//! a plan with zero sub-tasks changes its flag by direct toggle alone.

pub mod dispatch;

use dayring_store::{Horizon, PlanStore, StoreError};

/// Which horizons derive plan completion from sub-task state.
///
/// The observed source behavior only auto-derives for `daily` plans; other
/// horizons accumulate sub-task state without flipping the plan flag. That
/// asymmetry is preserved as the default, but as an explicit policy rather
/// than a buried branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpwardPolicy {
    #[default]
    DailyOnly,
    AllHorizons,
}

impl UpwardPolicy {
    fn applies_to(self, horizon: Horizon) -> bool {
        match self {
            Self::DailyOnly => horizon == Horizon::Daily,
            Self::AllHorizons => true,
        }
    }
}

/// Result of an upward propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtaskChange {
    /// The plan's `completed` flag after reconciliation.
    pub plan_completed: bool,
    /// Whether reconciliation flipped the plan flag.
    pub plan_flag_changed: bool,
}

/// The completion propagator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionPropagator {
    pub upward: UpwardPolicy,
}

impl CompletionPropagator {
    pub fn new(upward: UpwardPolicy) -> Self {
        Self { upward }
    }

    /// Set one sub-task's flag, then reconcile the plan flag (upward).
    ///
    /// When the policy applies to `horizon` and the sub-task list is
    /// non-empty: all sub-tasks completed marks the plan completed, anything
    /// less clears it. Persists exactly once.
    ///
    /// Returns an error if:
    /// - No plan with `id` exists in `horizon`.
    /// - `index` is out of range for the plan's sub-task list.
    pub fn set_subtask(
        &self,
        store: &mut PlanStore,
        horizon: Horizon,
        id: &str,
        index: usize,
        completed: bool,
    ) -> Result<SubtaskChange, StoreError> {
        let derive = self.upward.applies_to(horizon);
        let plan = store.plan_mut(horizon, id)?;

        let subtask = plan
            .subtasks
            .get_mut(index)
            .ok_or_else(|| StoreError::SubtaskNotFound {
                id: id.to_owned(),
                index,
            })?;
        subtask.completed = completed;

        let was_completed = plan.completed;
        if derive && !plan.subtasks.is_empty() {
            plan.completed = plan.all_subtasks_completed();
        }
        let change = SubtaskChange {
            plan_completed: plan.completed,
            plan_flag_changed: plan.completed != was_completed,
        };

        store.persist()?;
        Ok(change)
    }

    /// Set the plan flag directly, forcing every sub-task to match
    /// (downward).
    ///
    /// This is an unconditional overwrite for any horizon: un-checking the
    /// plan un-checks all its sub-tasks even if some were completed
    /// individually. Persists exactly once.
    pub fn set_plan_completion(
        &self,
        store: &mut PlanStore,
        horizon: Horizon,
        id: &str,
        completed: bool,
    ) -> Result<(), StoreError> {
        let plan = store.plan_mut(horizon, id)?;

        plan.completed = completed;
        for subtask in &mut plan.subtasks {
            subtask.completed = completed;
        }

        store.persist()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
