//! Review reports over the plan and activity data.
//!
//! A review report compares what was planned (daily-plan sub-tasks whose
//! deadline falls in the range) against what was actually finished (the
//! activity log), matching the two by name. The single-day history view
//! pairs one date's daily plans with its completed activities.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use dayring_store::{ActivityRecord, Plan};

use crate::projection::{self, PlanView};

/// Time window for a review report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    Today,
    LastWeek,
    Last21Days,
    Custom { from: NaiveDate, to: NaiveDate },
}

impl ReportRange {
    /// Resolve to inclusive `(from, to)` bounds.
    pub fn resolve(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Today => (today, today),
            Self::LastWeek => (today - Days::new(7), today),
            Self::Last21Days => (today - Days::new(21), today),
            Self::Custom { from, to } => (from, to),
        }
    }
}

/// Aggregated review statistics for one range.
#[derive(Debug, Clone)]
pub struct ReviewReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Sub-tasks across daily plans whose deadline falls in the range.
    pub planned_subtasks: usize,
    /// Activities completed in the range.
    pub completed_activities: usize,
    /// Completed activities whose name matches a planned sub-task.
    pub matched_completions: usize,
    /// `round(100 * matched / planned)`, zero when nothing was planned.
    pub completion_rate: u8,
    /// Activity counts per category, most frequent first.
    pub categories: Vec<(String, usize)>,
    /// Activities completed on a Saturday or Sunday.
    pub weekend_activities: usize,
}

impl ReviewReport {
    /// The category with the most completed activities, if any.
    pub fn top_category(&self) -> Option<&str> {
        self.categories.first().map(|(name, _)| name.as_str())
    }

    /// Whether the weekend stayed mostly free (under a fifth of all
    /// completions).
    pub fn weekend_mostly_free(&self) -> bool {
        (self.weekend_activities as f64) < (self.completed_activities as f64) * 0.2
    }
}

/// Build a review report from store snapshots.
pub fn review(
    daily_plans: &[Plan],
    activities: &[ActivityRecord],
    range: ReportRange,
    today: NaiveDate,
) -> ReviewReport {
    let (from, to) = range.resolve(today);

    let planned: Vec<&str> = daily_plans
        .iter()
        .filter(|p| p.deadline >= from && p.deadline <= to)
        .flat_map(|p| p.subtasks.iter().map(|s| s.text.as_str()))
        .collect();

    let finished: Vec<&ActivityRecord> = activities
        .iter()
        .filter(|r| {
            let d = r.completion_time.date_naive();
            d >= from && d <= to
        })
        .collect();

    let matched_completions = finished
        .iter()
        .filter(|r| {
            let name = r.name.trim().to_lowercase();
            planned.iter().any(|s| {
                let sub = s.trim().to_lowercase();
                name.contains(&sub) || sub.contains(&name)
            })
        })
        .count();

    let planned_subtasks = planned.len();
    let completion_rate = if planned_subtasks == 0 {
        0
    } else {
        ((matched_completions as f64 / planned_subtasks as f64) * 100.0).round() as u8
    };

    let mut categories: Vec<(String, usize)> = Vec::new();
    for record in &finished {
        match categories.iter().position(|(name, _)| *name == record.category) {
            Some(i) => categories[i].1 += 1,
            None => categories.push((record.category.clone(), 1)),
        }
    }
    categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let weekend_activities = finished
        .iter()
        .filter(|r| {
            matches!(
                r.completion_time.date_naive().weekday(),
                Weekday::Sat | Weekday::Sun
            )
        })
        .count();

    ReviewReport {
        from,
        to,
        planned_subtasks,
        completed_activities: finished.len(),
        matched_completions,
        completion_rate,
        categories,
        weekend_activities,
    }
}

/// One calendar date's daily plans and completed activities.
#[derive(Debug, Clone)]
pub struct DayHistory {
    pub date: NaiveDate,
    pub plans: Vec<PlanView>,
    pub activities: Vec<ActivityRecord>,
}

/// Collect the history view for `date`.
///
/// Plans are projected as of their own day, so the derived fields read the
/// way they did then (a plan due that day shows as due-today, not overdue).
pub fn history(
    daily_plans: &[Plan],
    activities: &[ActivityRecord],
    date: NaiveDate,
) -> DayHistory {
    let day_plans: Vec<Plan> = daily_plans
        .iter()
        .filter(|p| p.deadline == date)
        .cloned()
        .collect();

    let day_activities: Vec<ActivityRecord> = activities
        .iter()
        .filter(|r| r.completion_time.date_naive() == date)
        .cloned()
        .collect();

    DayHistory {
        date,
        plans: projection::views(&day_plans, date),
        activities: day_activities,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
