//! `dayring history` command: one day's plans and completed activities.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use dayring_core::report;
use dayring_store::{ActivityLog, Horizon, PlanStore};

/// Run the history command.
pub fn run_history(store: &PlanStore, log: &ActivityLog, date_str: &str) -> Result<()> {
    let date = date_str
        .parse::<NaiveDate>()
        .with_context(|| format!("invalid date {date_str:?} (expected YYYY-MM-DD)"))?;

    let history = report::history(store.bucket(Horizon::Daily), log.all(), date);

    println!("Looking back at {}", history.date);
    println!();

    if history.plans.is_empty() {
        println!("No daily plans were recorded for that date.");
    } else {
        println!("Daily plans:");
        for view in &history.plans {
            println!(
                "  {} {} ({}/{} sub-tasks, {}%)",
                if view.plan.completed { "[x]" } else { "[ ]" },
                view.plan.title,
                view.plan.completed_subtasks(),
                view.plan.subtasks.len(),
                view.percent_complete,
            );
            for subtask in &view.plan.subtasks {
                println!(
                    "      [{}] {}",
                    if subtask.completed { "x" } else { " " },
                    subtask.text
                );
            }
        }
    }
    println!();

    if history.activities.is_empty() {
        println!("No activities were completed that day.");
        return Ok(());
    }

    println!("Completed activities:");
    for record in &history.activities {
        println!(
            "  {}-{}  {} ({})",
            record.start_time.format("%H:%M"),
            record.end_time.format("%H:%M"),
            record.name,
            record.category,
        );
    }

    Ok(())
}
