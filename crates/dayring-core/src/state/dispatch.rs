//! The command interface over the plan store.
//!
//! Every mutation the UI layers can perform is an [`Action`]; [`dispatch`]
//! is the single entry point that applies it through the store and the
//! completion propagator. This keeps the state machine testable independent
//! of any rendering technology, and gives the CLI and the TUI one shared
//! mutation path.

use chrono::{DateTime, Utc};

use dayring_store::{Horizon, NewPlan, Plan, PlanStore, PlanUpdate, StoreError};

use super::{CompletionPropagator, SubtaskChange};

/// A mutation request against the plan store.
#[derive(Debug, Clone)]
pub enum Action {
    CreatePlan {
        horizon: Horizon,
        new: NewPlan,
    },
    UpdatePlan {
        horizon: Horizon,
        id: String,
        update: PlanUpdate,
    },
    DeletePlan {
        horizon: Horizon,
        id: String,
    },
    SetSubtask {
        horizon: Horizon,
        id: String,
        index: usize,
        completed: bool,
    },
    SetPlanCompletion {
        horizon: Horizon,
        id: String,
        completed: bool,
    },
}

/// What a dispatched action did.
#[derive(Debug, Clone)]
pub enum Outcome {
    Created(Plan),
    Updated(Plan),
    /// `true` when a plan was actually removed.
    Deleted(bool),
    SubtaskSet(SubtaskChange),
    PlanCompletionSet,
}

/// Apply one action to the store.
///
/// `now` stamps creations; reads of the clock never happen below this
/// boundary, which keeps the whole state machine deterministic under test.
pub fn dispatch(
    store: &mut PlanStore,
    propagator: &CompletionPropagator,
    action: Action,
    now: DateTime<Utc>,
) -> Result<Outcome, StoreError> {
    match action {
        Action::CreatePlan { horizon, new } => {
            let plan = store.create(horizon, new, now)?;
            Ok(Outcome::Created(plan))
        }
        Action::UpdatePlan { horizon, id, update } => {
            let plan = store.update(horizon, &id, update)?;
            Ok(Outcome::Updated(plan))
        }
        Action::DeletePlan { horizon, id } => {
            let removed = store.delete(horizon, &id)?;
            Ok(Outcome::Deleted(removed))
        }
        Action::SetSubtask {
            horizon,
            id,
            index,
            completed,
        } => {
            let change = propagator.set_subtask(store, horizon, &id, index, completed)?;
            Ok(Outcome::SubtaskSet(change))
        }
        Action::SetPlanCompletion {
            horizon,
            id,
            completed,
        } => {
            propagator.set_plan_completion(store, horizon, &id, completed)?;
            Ok(Outcome::PlanCompletionSet)
        }
    }
}
