//! TUI application state and data model.

use chrono::Utc;

use dayring_core::projection::{self, PlanView};
use dayring_core::{Action, CompletionPropagator, dispatch};
use dayring_store::{Horizon, PlanStore};

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Plans,
    Subtasks,
}

/// Application state for the TUI.
pub struct App {
    store: PlanStore,
    propagator: CompletionPropagator,
    pub horizon: Horizon,
    pub views: Vec<PlanView>,
    pub selected_plan: usize,
    pub selected_subtask: usize,
    pub focus: Focus,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: PlanStore) -> Self {
        let mut app = Self {
            store,
            propagator: CompletionPropagator::default(),
            horizon: Horizon::Daily,
            views: Vec::new(),
            selected_plan: 0,
            selected_subtask: 0,
            focus: Focus::Plans,
            show_help: false,
            should_quit: false,
            status_message: None,
        };
        app.refresh();
        app
    }

    /// Recompute the projected rows for the current horizon.
    pub fn refresh(&mut self) {
        let today = Utc::now().date_naive();
        self.views = projection::views(self.store.bucket(self.horizon), today);

        if self.selected_plan >= self.views.len() && !self.views.is_empty() {
            self.selected_plan = self.views.len() - 1;
        }
        let subtask_count = self.selected_view().map_or(0, |v| v.plan.subtasks.len());
        if self.selected_subtask >= subtask_count && subtask_count > 0 {
            self.selected_subtask = subtask_count - 1;
        }
        if subtask_count == 0 {
            self.selected_subtask = 0;
            self.focus = Focus::Plans;
        }
    }

    pub fn selected_view(&self) -> Option<&PlanView> {
        self.views.get(self.selected_plan)
    }

    // -- Navigation --

    pub fn navigate_back(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.focus {
            Focus::Subtasks => self.focus = Focus::Plans,
            Focus::Plans => self.should_quit = true,
        }
    }

    pub fn navigate_enter(&mut self) {
        if self.focus == Focus::Plans
            && self.selected_view().is_some_and(|v| !v.plan.subtasks.is_empty())
        {
            self.focus = Focus::Subtasks;
            self.selected_subtask = 0;
        }
    }

    pub fn cycle_horizon(&mut self) {
        let index = Horizon::ALL
            .iter()
            .position(|h| *h == self.horizon)
            .unwrap_or(0);
        self.horizon = Horizon::ALL[(index + 1) % Horizon::ALL.len()];
        self.selected_plan = 0;
        self.selected_subtask = 0;
        self.focus = Focus::Plans;
        self.refresh();
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Plans => {
                if self.selected_plan > 0 {
                    self.selected_plan -= 1;
                    self.selected_subtask = 0;
                }
            }
            Focus::Subtasks => {
                if self.selected_subtask > 0 {
                    self.selected_subtask -= 1;
                }
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Plans => {
                if !self.views.is_empty() && self.selected_plan < self.views.len() - 1 {
                    self.selected_plan += 1;
                    self.selected_subtask = 0;
                }
            }
            Focus::Subtasks => {
                let count = self.selected_view().map_or(0, |v| v.plan.subtasks.len());
                if count > 0 && self.selected_subtask < count - 1 {
                    self.selected_subtask += 1;
                }
            }
        }
    }

    pub fn open_help(&mut self) {
        self.show_help = true;
    }

    // -- Actions --

    /// Toggle whatever the focus is on: the selected plan's completion, or
    /// the selected sub-task.
    pub fn toggle_selected(&mut self) {
        let Some(view) = self.selected_view() else {
            return;
        };
        let id = view.plan.id.clone();

        let action = match self.focus {
            Focus::Plans => Action::SetPlanCompletion {
                horizon: self.horizon,
                id,
                completed: !view.plan.completed,
            },
            Focus::Subtasks => {
                let Some(subtask) = view.plan.subtasks.get(self.selected_subtask) else {
                    return;
                };
                Action::SetSubtask {
                    horizon: self.horizon,
                    id,
                    index: self.selected_subtask,
                    completed: !subtask.completed,
                }
            }
        };
        self.apply(action);
    }

    pub fn delete_selected(&mut self) {
        if self.focus != Focus::Plans {
            return;
        }
        let Some(view) = self.selected_view() else {
            return;
        };
        let title = view.plan.title.clone();
        let action = Action::DeletePlan {
            horizon: self.horizon,
            id: view.plan.id.clone(),
        };
        self.apply(action);
        if self.status_message.is_none() {
            self.status_message = Some(format!("Deleted \"{title}\""));
        }
    }

    /// Run one action through the dispatch layer and surface failures in
    /// the status bar. Persistence failures are non-fatal: the in-memory
    /// model keeps the change and the user is told the disk is behind.
    fn apply(&mut self, action: Action) {
        match dispatch(&mut self.store, &self.propagator, action, Utc::now()) {
            Ok(_) => {}
            Err(e) if e.is_persistence() => {
                self.status_message =
                    Some(format!("Saving failed ({e}); changes kept in memory"));
            }
            Err(e) => {
                self.status_message = Some(format!("Action failed: {e}"));
            }
        }
        self.refresh();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use dayring_store::NewPlan;

    use super::*;

    fn app_with_plans() -> (App, tempfile::TempDir) {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut store = PlanStore::open(tmp.path().join("plans.json"));
        for (title, subtasks) in [("with steps", vec!["a", "b"]), ("bare", vec![])] {
            store
                .create(
                    Horizon::Daily,
                    NewPlan {
                        title: title.into(),
                        deadline: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                        subtasks: subtasks.into_iter().map(String::from).collect(),
                    },
                    Utc::now(),
                )
                .unwrap();
        }
        (App::new(store), tmp)
    }

    #[test]
    fn enter_only_focuses_plans_with_subtasks() {
        let (mut app, _tmp) = app_with_plans();

        app.selected_plan = 0;
        app.navigate_enter();
        assert_eq!(app.focus, Focus::Subtasks);

        app.navigate_back();
        app.selected_plan = 1;
        app.navigate_enter();
        assert_eq!(app.focus, Focus::Plans, "a bare plan has nothing to focus");
    }

    #[test]
    fn toggling_a_plan_checks_its_subtasks() {
        let (mut app, _tmp) = app_with_plans();

        app.selected_plan = 0;
        app.toggle_selected();

        let view = app.selected_view().unwrap();
        assert!(view.plan.completed);
        assert!(view.plan.subtasks.iter().all(|s| s.completed));
        assert_eq!(view.percent_complete, 100);
    }

    #[test]
    fn horizon_cycles_through_all_four() {
        let (mut app, _tmp) = app_with_plans();
        let start = app.horizon;
        for _ in 0..Horizon::ALL.len() {
            app.cycle_horizon();
        }
        assert_eq!(app.horizon, start);
    }

    #[test]
    fn delete_clamps_the_selection() {
        let (mut app, _tmp) = app_with_plans();
        app.selected_plan = 1;
        app.delete_selected();
        assert_eq!(app.views.len(), 1);
        assert_eq!(app.selected_plan, 0);
    }
}
