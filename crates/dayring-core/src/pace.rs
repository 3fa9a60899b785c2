//! Day-pace monitoring: how far through the day you are versus how much of
//! today's plan is done, and whether that gap warrants a reminder.

use chrono::{NaiveTime, Timelike};

use dayring_store::Plan;

/// Percent of the 24-hour day elapsed at `now`, rounded.
pub fn day_progress_percent(now: NaiveTime) -> u8 {
    let elapsed = (now.hour() * 60 + now.minute()) as f64;
    ((elapsed / (24.0 * 60.0)) * 100.0).round() as u8
}

/// Aggregate completion percent over every sub-task of the daily plans.
///
/// Counts individual sub-tasks, not plans, so a large plan weighs more than
/// a small one. Zero when there are no sub-tasks at all.
pub fn subtask_completion_percent(daily_plans: &[Plan]) -> u8 {
    let total: usize = daily_plans.iter().map(|p| p.subtasks.len()).sum();
    if total == 0 {
        return 0;
    }
    let completed: usize = daily_plans.iter().map(Plan::completed_subtasks).sum();
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Whether the day has run far enough ahead of the task list to nag.
///
/// Fires when much of the day is gone with little done:
/// - 60% of the day elapsed and the gap is at least 40 points, or
/// - 80% elapsed and the gap is at least 50 points, or
/// - 90% elapsed with tasks under 70%.
pub fn should_remind(day_percent: u8, task_percent: u8) -> bool {
    let gap = day_percent as i16 - task_percent as i16;
    (day_percent >= 60 && gap >= 40)
        || (day_percent >= 80 && gap >= 50)
        || (day_percent >= 90 && task_percent < 70)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn day_progress_at_landmarks() {
        assert_eq!(day_progress_percent(t(0, 0)), 0);
        assert_eq!(day_progress_percent(t(6, 0)), 25);
        assert_eq!(day_progress_percent(t(12, 0)), 50);
        assert_eq!(day_progress_percent(t(18, 0)), 75);
        assert_eq!(day_progress_percent(t(23, 59)), 100);
    }

    #[test]
    fn reminder_rule_boundaries() {
        // Early in the day: never remind, whatever the task state.
        assert!(!should_remind(30, 0));

        // 60% elapsed, nothing done: gap 60 >= 40.
        assert!(should_remind(60, 0));
        // 60% elapsed, 25 done: gap 35 < 40.
        assert!(!should_remind(60, 25));

        // 80% elapsed, 30 done: gap 50 fires the second rule.
        assert!(should_remind(80, 30));

        // 90% elapsed, 69 done: third rule fires regardless of gap.
        assert!(should_remind(90, 69));
        assert!(!should_remind(90, 70));

        // Keeping pace all day never reminds.
        assert!(!should_remind(95, 95));
    }
}
