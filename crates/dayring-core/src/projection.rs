//! Read-only display projections over the plan store.
//!
//! Nothing here mutates: callers pass `today` explicitly and get derived
//! rows back. The rendering layers re-run these after every dispatch.

use std::fmt;

use chrono::NaiveDate;

use dayring_store::Plan;

/// Coarse deadline bucket derived from days-remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyTier {
    Overdue,
    DueToday,
    DueSoon,
    DueLater,
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due today",
            Self::DueSoon => "due soon",
            Self::DueLater => "due later",
        };
        f.write_str(s)
    }
}

/// Whole days between today and the plan's deadline, both at midnight.
///
/// Negative for overdue plans, zero for due-today, positive otherwise.
/// Idempotent under repeated calls on the same day; decreases by exactly
/// one per elapsed calendar day.
pub fn days_remaining(plan: &Plan, today: NaiveDate) -> i64 {
    (plan.deadline - today).num_days()
}

/// Partition days-remaining into an urgency tier. Total over all of `i64`.
pub fn urgency(days_remaining: i64) -> UrgencyTier {
    match days_remaining {
        d if d < 0 => UrgencyTier::Overdue,
        0 => UrgencyTier::DueToday,
        1..=3 => UrgencyTier::DueSoon,
        _ => UrgencyTier::DueLater,
    }
}

/// Percentage of completed sub-tasks, rounded to the nearest integer.
/// A plan with no sub-tasks reports zero.
pub fn completion_percentage(plan: &Plan) -> u8 {
    let total = plan.subtasks.len();
    if total == 0 {
        return 0;
    }
    let completed = plan.completed_subtasks();
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// One plan with its derived display fields attached.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub plan: Plan,
    pub days_remaining: i64,
    pub urgency: UrgencyTier,
    pub percent_complete: u8,
}

impl PlanView {
    fn project(plan: &Plan, today: NaiveDate) -> Self {
        let days = days_remaining(plan, today);
        Self {
            plan: plan.clone(),
            days_remaining: days,
            urgency: urgency(days),
            percent_complete: completion_percentage(plan),
        }
    }
}

/// Project a bucket into display rows, sorted ascending by deadline.
///
/// Ties keep the bucket's insertion order (the sort is stable), which is
/// display-significant.
pub fn views(plans: &[Plan], today: NaiveDate) -> Vec<PlanView> {
    let mut rows: Vec<PlanView> = plans.iter().map(|p| PlanView::project(p, today)).collect();
    rows.sort_by_key(|v| v.plan.deadline);
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
